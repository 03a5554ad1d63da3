//! Integration tests for the HTML parser.

use sapling_dom::{DocumentMode, DomTree, NodeId, NodeType};
use sapling_html::{
    DomSink, FragmentContext, InsertionMode, IssueCode, Namespace, Parser, ParserOptions,
    TokenizerState, TreeErrorCode, parse_document, parse_document_with_issues, parse_document_with_options,
    parse_fragment,
};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_document(html)
}

/// Helper to dump the children of `<body>` in the html5lib tree format
fn body_tree(html: &str) -> String {
    let tree = parse(html);
    let body = tree.body().expect("document has a body");
    tree.to_test_format_from(body)
}

/// Helper to collect the tree-construction error codes
fn tree_errors(html: &str) -> Vec<TreeErrorCode> {
    let (_, issues) = parse_document_with_issues(html);
    issues
        .iter()
        .filter_map(|issue| match issue.code {
            IssueCode::Tree(code) => Some(code),
            IssueCode::Lexical(_) => None,
        })
        .collect()
}

/// Helper to find all elements with a given tag name under a subtree
fn find_all_elements(tree: &DomTree, from: NodeId, tag: &str) -> Vec<NodeId> {
    let mut result = Vec::new();
    if tree.as_element(from).is_some_and(|e| e.tag_name == tag) {
        result.push(from);
    }
    for &child_id in tree.children(from) {
        result.extend(find_all_elements(tree, child_id, tag));
    }
    result
}

// ========== Document Structure Tests ==========

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
    assert_eq!(
        tree.to_test_format(),
        "| <!DOCTYPE html>\n| <html>\n|   <head>\n|   <body>\n"
    );
    assert_eq!(tree.document_mode(), DocumentMode::NoQuirks);
}

#[test]
fn test_implied_html_head_body() {
    let tree = parse("Hello");
    assert_eq!(
        tree.to_test_format(),
        "| <html>\n|   <head>\n|   <body>\n|     \"Hello\"\n"
    );
}

#[test]
fn test_comments_at_every_level() {
    let tree = parse("<!DOCTYPE html><!--a--><html><!--b--><body></body></html><!--c-->");
    assert_eq!(
        tree.to_test_format(),
        "\
| <!DOCTYPE html>
| <!-- a -->
| <html>
|   <!-- b -->
|   <head>
|   <body>
| <!-- c -->
"
    );
}

#[test]
fn test_head_content_after_head_goes_back_into_head() {
    let tree = parse("<head></head><title>t</title>");
    assert_eq!(
        tree.to_test_format(),
        "\
| <html>
|   <head>
|     <title>
|       \"t\"
|   <body>
"
    );
}

#[test]
fn test_element_attributes() {
    assert_eq!(
        body_tree(r#"<div id="main" class="b a"></div>"#),
        "| <div>\n|   class=\"b a\"\n|   id=\"main\"\n"
    );
}

#[test]
fn test_body_attributes_merge() {
    let tree = parse("<body a=1><body a=2 b=3>");
    let body = tree.as_element(tree.body().unwrap()).unwrap();
    assert_eq!(body.attr("a"), Some("1"));
    assert_eq!(body.attr("b"), Some("3"));
}

#[test]
fn test_void_elements() {
    assert_eq!(
        body_tree("<p>a<br>b<img src=x>c</p>"),
        "\
| <p>
|   \"a\"
|   <br>
|   \"b\"
|   <img>
|     src=\"x\"
|   \"c\"
"
    );
}

#[test]
fn test_image_becomes_img() {
    assert_eq!(body_tree("<image src=x>"), "| <img>\n|   src=\"x\"\n");
}

#[test]
fn test_title_content_preserved() {
    let tree = parse("<html><head><title>My <test> &amp; Title</title></head></html>");
    let title = tree.find_element(tree.root(), "title").unwrap();
    assert_eq!(tree.text_content(title), "My <test> & Title");
}

#[test]
fn test_style_with_html_like_content() {
    let tree = parse("<style>p > a { color: red; }</div></style>");
    let style = tree.find_element(tree.root(), "style").unwrap();
    assert_eq!(tree.text_content(style), "p > a { color: red; }</div>");
}

#[test]
fn test_leading_newline_dropped_in_pre_and_textarea() {
    assert_eq!(body_tree("<pre>\n\nx</pre>"), "| <pre>\n|   \"\nx\"\n");
    assert_eq!(body_tree("<textarea>\nx</textarea>"), "| <textarea>\n|   \"x\"\n");
}

#[test]
fn test_multiple_text_nodes_merged() {
    let tree = parse("<p>a&amp;b<!---->c</p>");
    let p = tree.find_element(tree.root(), "p").unwrap();
    assert_eq!(tree.children(p).len(), 3);
    assert_eq!(tree.as_text(tree.children(p)[0]), Some("a&b"));
}

// ========== Implied End Tag Tests ==========

#[test]
fn test_li_implicit_close() {
    assert_eq!(
        body_tree("<ul><li>a<li>b</ul>"),
        "| <ul>\n|   <li>\n|     \"a\"\n|   <li>\n|     \"b\"\n"
    );
}

#[test]
fn test_dd_dt_implicit_close() {
    assert_eq!(
        body_tree("<dl><dt>a<dd>b<dt>c</dl>"),
        "\
| <dl>
|   <dt>
|     \"a\"
|   <dd>
|     \"b\"
|   <dt>
|     \"c\"
"
    );
}

#[test]
fn test_heading_closes_heading() {
    assert_eq!(
        body_tree("<h1>a<h2>b"),
        "| <h1>\n|   \"a\"\n| <h2>\n|   \"b\"\n"
    );
}

#[test]
fn test_stray_paragraph_end_tag_creates_empty_p() {
    assert_eq!(body_tree("<body></p>"), "| <p>\n");
    assert!(tree_errors("<!DOCTYPE html><body></p>").contains(&TreeErrorCode::StrayEndTag));
}

#[test]
fn test_nested_forms_ignored() {
    assert_eq!(body_tree("<form><form>x"), "| <form>\n|   \"x\"\n");
}

// ========== Adoption Agency Algorithm Tests ==========

#[test]
fn test_adoption_agency_simple_misnesting() {
    // <p><b>X<i>Y</b>Z</i></p>: closing <b> splits the <i>.
    assert_eq!(
        body_tree("<p><b>X<i>Y</b>Z</i></p>"),
        "\
| <p>
|   <b>
|     \"X\"
|     <i>
|       \"Y\"
|   <i>
|     \"Z\"
"
    );
}

#[test]
fn test_adoption_agency_moves_block_out_of_formatting() {
    assert_eq!(
        body_tree("<b>1<p>2</b>3</p>"),
        "\
| <b>
|   \"1\"
| <p>
|   <b>
|     \"2\"
|   \"3\"
"
    );
    assert!(tree_errors("<!DOCTYPE html><b>1<p>2</b>3</p>").contains(&TreeErrorCode::MisnestedFormatting));
}

#[test]
fn test_adoption_agency_no_furthest_block() {
    assert_eq!(
        body_tree("<a>1<b>2</a>3</b>"),
        "\
| <a>
|   \"1\"
|   <b>
|     \"2\"
| <b>
|   \"3\"
"
    );
}

#[test]
fn test_nested_anchor_tags() {
    assert_eq!(
        body_tree("<a href=x>1<a href=y>2</a>3"),
        "\
| <a>
|   href=\"x\"
|   \"1\"
| <a>
|   href=\"y\"
|   \"2\"
| \"3\"
"
    );
    assert!(tree_errors("<!DOCTYPE html><a><a>").contains(&TreeErrorCode::NestedElement));
}

#[test]
fn test_formatting_reconstruction_across_blocks() {
    let tree = parse("<p><b>bold</p><p>still bold</p></b>");
    let body = tree.body().unwrap();
    let ps = find_all_elements(&tree, body, "p");
    assert_eq!(ps.len(), 2);
    assert_eq!(find_all_elements(&tree, ps[1], "b").len(), 1);
    assert_eq!(tree.text_content(ps[1]), "still bold");
}

#[test]
fn test_noahs_ark_keeps_three_identical_entries() {
    assert_eq!(
        body_tree("<p><b class=x><b class=x><b class=x><b class=x>X<p>Y"),
        "\
| <p>
|   <b>
|     class=\"x\"
|     <b>
|       class=\"x\"
|       <b>
|         class=\"x\"
|         <b>
|           class=\"x\"
|           \"X\"
| <p>
|   <b>
|     class=\"x\"
|     <b>
|       class=\"x\"
|       <b>
|         class=\"x\"
|         \"Y\"
"
    );
}

#[test]
fn test_any_other_end_tag_ignores_special() {
    assert_eq!(body_tree("<div><span>x</div>y"), "| <div>\n|   <span>\n|     \"x\"\n| \"y\"\n");
}

// ========== Table Tests ==========

#[test]
fn test_table_implies_tbody_and_tr() {
    assert_eq!(
        body_tree("<table><td>x"),
        "\
| <table>
|   <tbody>
|     <tr>
|       <td>
|         \"x\"
"
    );
}

#[test]
fn test_caption_and_colgroup() {
    assert_eq!(
        body_tree("<table><caption>c</caption><col></table>"),
        "\
| <table>
|   <caption>
|     \"c\"
|   <colgroup>
|     <col>
"
    );
}

#[test]
fn test_foster_parented_text() {
    assert_eq!(
        body_tree("<table>A<tr><td>B</td></tr>C</table>"),
        "\
| \"AC\"
| <table>
|   <tbody>
|     <tr>
|       <td>
|         \"B\"
"
    );
    assert!(tree_errors("<!DOCTYPE html><table>A</table>").contains(&TreeErrorCode::FosterParented));
}

#[test]
fn test_foster_parented_element() {
    assert_eq!(
        body_tree("<table><b>x</b><tr><td>y</table>"),
        "\
| <b>
|   \"x\"
| <table>
|   <tbody>
|     <tr>
|       <td>
|         \"y\"
"
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_eq!(
        body_tree("<table> <tr> </tr> </table>"),
        "\
| <table>
|   \" \"
|   <tbody>
|     <tr>
|       \" \"
|     \" \"
"
    );
}

#[test]
fn test_select_closed_by_input() {
    assert_eq!(body_tree("<select><input>"), "| <select>\n| <input>\n");
}

#[test]
fn test_select_drops_nested_markup() {
    assert_eq!(
        body_tree("<select><option>a<div>b</div><option>c</select>"),
        "\
| <select>
|   <option>
|     \"ab\"
|   <option>
|     \"c\"
"
    );
}

// ========== Quirks Mode Tests ==========

#[test]
fn test_missing_doctype_is_quirks() {
    let (tree, issues) = parse_document_with_issues("<p>x");
    assert_eq!(tree.document_mode(), DocumentMode::Quirks);
    assert_eq!(issues[0].code, IssueCode::Tree(TreeErrorCode::MissingDoctype));
}

#[test]
fn test_legacy_doctypes() {
    let quirky = parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#);
    assert_eq!(quirky.document_mode(), DocumentMode::Quirks);

    let limited = parse(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#,
    );
    assert_eq!(limited.document_mode(), DocumentMode::LimitedQuirks);
    assert_eq!(
        limited.to_test_format().lines().next(),
        Some(
            "| <!DOCTYPE html \"-//W3C//DTD HTML 4.01 Transitional//EN\" \"http://www.w3.org/TR/html4/loose.dtd\">"
        )
    );
}

#[test]
fn test_html401_transitional_without_system_id() {
    // Without a system identifier the 4.01 Transitional and Frameset public
    // identifiers select quirks mode, not limited quirks.
    let transitional = parse(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#);
    assert_eq!(transitional.document_mode(), DocumentMode::Quirks);
    let frameset = parse(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Frameset//EN">"#);
    assert_eq!(frameset.document_mode(), DocumentMode::Quirks);

    // XHTML 1.0 Transitional is limited quirks either way.
    let xhtml = parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN">"#);
    assert_eq!(xhtml.document_mode(), DocumentMode::LimitedQuirks);
}

#[test]
fn test_iframe_srcdoc_is_never_quirks() {
    let (tree, issues) =
        parse_document_with_options("<p>x", ParserOptions::new().with_iframe_srcdoc());
    assert_eq!(tree.document_mode(), DocumentMode::NoQuirks);
    assert!(issues.is_empty());
}

#[test]
fn test_table_closes_paragraph_only_outside_quirks() {
    assert_eq!(body_tree("<!DOCTYPE html><p><table>"), "| <p>\n| <table>\n");
    assert_eq!(body_tree("<p><table>"), "| <p>\n|   <table>\n");
}

// ========== Frameset Tests ==========

#[test]
fn test_frameset_document() {
    let tree = parse("<frameset><frame></frameset>");
    assert_eq!(
        tree.to_test_format(),
        "| <html>\n|   <head>\n|   <frameset>\n|     <frame>\n"
    );
}

#[test]
fn test_frameset_ignored_after_content() {
    assert_eq!(body_tree("<p>x</p><frameset>"), "| <p>\n|   \"x\"\n");
}

// ========== Foreign Content Tests ==========

#[test]
fn test_svg_names_are_camel_cased() {
    assert_eq!(
        body_tree(
            r#"<svg viewbox="0 0 1 1"><foreignobject><p>x</p></foreignobject><lineargradient/></svg>"#
        ),
        "\
| <svg svg>
|   viewBox=\"0 0 1 1\"
|   <svg foreignObject>
|     <p>
|       \"x\"
|   <svg linearGradient>
"
    );
}

#[test]
fn test_foreign_attributes_are_namespaced() {
    let tree = parse(r##"<svg><a xlink:href="#x"></a></svg>"##);
    assert_eq!(
        tree.to_test_format_from(tree.body().unwrap()),
        "| <svg svg>\n|   <svg a>\n|     xlink href=\"#x\"\n"
    );
    let a = tree.find_element(tree.root(), "a").unwrap();
    assert_eq!(tree.as_element(a).unwrap().namespace, Namespace::Svg);
}

#[test]
fn test_mathml_integration_points() {
    assert_eq!(
        body_tree(
            r#"<math><mi>x</mi><annotation-xml encoding="text/html"><div>y</div></annotation-xml></math>"#
        ),
        "\
| <math math>
|   <math mi>
|     \"x\"
|   <math annotation-xml>
|     encoding=\"text/html\"
|     <div>
|       \"y\"
"
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_eq!(
        body_tree("<svg><b>x</b></svg>y"),
        "| <svg svg>\n| <b>\n|   \"x\"\n| \"y\"\n"
    );
    assert!(
        tree_errors("<!DOCTYPE html><svg><b>")
            .contains(&TreeErrorCode::HtmlStartTagInForeignContent)
    );
}

#[test]
fn test_breakout_depends_on_the_name_not_the_group() {
    // `img` and `span` break out; `article` and `area` share their groups but stay foreign.
    assert_eq!(body_tree("<svg><img></svg>"), "| <svg svg>\n| <img>\n");
    assert_eq!(body_tree("<svg><span>x"), "| <svg svg>\n| <span>\n|   \"x\"\n");
    assert_eq!(
        body_tree("<svg><article>x"),
        "| <svg svg>\n|   <svg article>\n|     \"x\"\n"
    );
    assert_eq!(body_tree("<svg><area/></svg>"), "| <svg svg>\n|   <svg area>\n");
}

#[test]
fn test_cdata_in_svg_is_text() {
    assert_eq!(
        body_tree("<svg><![CDATA[a<b]]></svg>"),
        "| <svg svg>\n|   \"a<b\"\n"
    );
}

// ========== Template Tests ==========

#[test]
fn test_template_contents_are_children() {
    let tree = parse("<template><td>x</td></template>");
    assert_eq!(
        tree.to_test_format(),
        "\
| <html>
|   <head>
|     <template>
|       <td>
|         \"x\"
|   <body>
"
    );
}

#[test]
fn test_stray_template_end_tag() {
    assert!(tree_errors("<!DOCTYPE html></template>").contains(&TreeErrorCode::StrayEndTag));
}

// ========== Scripting Flag Tests ==========

#[test]
fn test_noscript_depends_on_scripting() {
    let enabled = parse("<noscript><p>x</p></noscript>");
    assert_eq!(
        enabled.to_test_format(),
        "\
| <html>
|   <head>
|     <noscript>
|       \"<p>x</p>\"
|   <body>
"
    );

    let (disabled, _) = parse_document_with_options(
        "<noscript><p>x</p></noscript>",
        ParserOptions::new().with_scripting(false),
    );
    assert_eq!(
        disabled.to_test_format(),
        "\
| <html>
|   <head>
|     <noscript>
|   <body>
|     <p>
|       \"x\"
"
    );
}

// ========== Fragment Tests ==========

#[test]
fn test_fragment_in_table_row() {
    let tree = parse_fragment("<td>x", &FragmentContext::html("tr"));
    assert_eq!(tree.to_test_format(), "| <td>\n|   \"x\"\n");
}

#[test]
fn test_fragment_in_title_is_rcdata() {
    let tree = parse_fragment("<b>&amp;</b>", &FragmentContext::html("title"));
    assert_eq!(tree.to_test_format(), "| \"<b>&</b>\"\n");
}

#[test]
fn test_fragment_in_svg() {
    let tree = parse_fragment("<path/><p>x", &FragmentContext::foreign("svg", Namespace::Svg));
    assert_eq!(tree.to_test_format(), "| <svg path>\n| <p>\n|   \"x\"\n");
}

// ========== Streaming Tests ==========

#[test]
fn test_every_split_point_gives_the_same_tree() {
    let input = "<!DOCTYPE html><p class=\"a&amp;b\">x\r\ny<!-- c --><table>z<td>&notin;</table>";
    let expected = parse(input).to_test_format();
    for split in (1..input.len()).filter(|&i| input.is_char_boundary(i)) {
        let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
        parser.feed_all(&input[..split]).unwrap();
        parser.feed_all(&input[split..]).unwrap();
        let tree = parser.finish().unwrap().into_tree();
        assert_eq!(tree.to_test_format(), expected, "split at {split}");
    }
}

#[test]
fn test_long_attribute_fed_in_chunks() {
    let value = "x".repeat(10_000);
    let input = format!("<div title=\"{value}\">");
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    for chunk in input.as_bytes().chunks(13) {
        parser.feed_all(std::str::from_utf8(chunk).unwrap()).unwrap();
    }
    let tree = parser.finish().unwrap().into_tree();
    let div = tree.find_element(tree.root(), "div").unwrap();
    assert_eq!(tree.as_element(div).unwrap().attr("title"), Some(value.as_str()));
}

#[test]
fn test_meta_charset_is_reported() {
    let input = r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"><p>x"#;
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    parser.feed_all(input).unwrap();
    assert_eq!(parser.sink().declared_charset(), Some("utf-8"));
}

#[test]
fn test_charset_suspension_and_resume() {
    let input = "<meta charset=\"windows-1252\"><p>x";
    let mut parser = Parser::new(DomSink::new().with_charset_suspension(), ParserOptions::new());
    let status = parser.feed(input).unwrap();
    let sapling_html::FeedStatus::Suspended { consumed } = status else {
        panic!("expected suspension, got {status:?}");
    };
    assert_eq!(&input[..consumed], "<meta charset=\"windows-1252\">");
    assert_eq!(parser.tree_builder().insertion_mode(), InsertionMode::InHead);

    // The host re-decodes and resumes from the state captured at the stop.
    let snapshot = parser.snapshot();
    assert_eq!(snapshot.tokenizer().state(), TokenizerState::Data);
    assert_eq!(snapshot.tree().insertion_mode(), InsertionMode::InHead);
    parser.restore(&snapshot);
    assert!(parser.tree_builder().matches(snapshot.tree()));

    parser.feed_all(&input[consumed..]).unwrap();
    let tree = parser.finish().unwrap().into_tree();
    assert_eq!(
        tree.to_test_format(),
        "| <html>\n|   <head>\n|     <meta>\n|       charset=\"windows-1252\"\n|   <body>\n|     <p>\n|       \"x\"\n"
    );
}

#[test]
fn test_snapshot_keeps_pending_table_text() {
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    parser.feed_all("<!DOCTYPE html><table>a").unwrap();
    let snapshot = parser.snapshot();
    assert_eq!(snapshot.tree().insertion_mode(), InsertionMode::InTableText);
    assert_eq!(snapshot.tree().pending_table_text(), "a");

    parser.restore(&snapshot);
    assert!(parser.tree_builder().matches(snapshot.tree()));
    parser.feed_all("</table>").unwrap();

    let tree = parser.finish().unwrap().into_tree();
    let body = tree.body().unwrap();
    assert_eq!(tree.to_test_format_from(body), "| \"a\"\n| <table>\n");
}

#[test]
fn test_pending_table_text_differs_from_snapshot() {
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    parser.feed_all("<!DOCTYPE html><table> ").unwrap();
    let snapshot = parser.snapshot();
    parser.feed_all("b").unwrap();
    assert!(!parser.tree_builder().matches(snapshot.tree()));

    parser.restore(&snapshot);
    assert!(parser.tree_builder().matches(snapshot.tree()));
    parser.feed_all("</table>").unwrap();
    let tree = parser.finish().unwrap().into_tree();
    let body = tree.body().unwrap();
    assert_eq!(tree.to_test_format_from(body), "| <table>\n|   \" \"\n");
}

#[test]
fn test_snapshot_keeps_formatting_list_and_marker() {
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    parser.feed_all("<!DOCTYPE html><b><table><td><i>x").unwrap();
    let snapshot = parser.snapshot();
    assert_eq!(snapshot.tree().insertion_mode(), InsertionMode::InCell);
    // b, the cell's marker, i
    assert_eq!(snapshot.tree().formatting_entries(), 3);

    parser.feed_all("</table>").unwrap();
    assert_eq!(parser.tree_builder().insertion_mode(), InsertionMode::InBody);
    assert!(!parser.tree_builder().matches(snapshot.tree()));

    parser.restore(&snapshot);
    assert!(parser.tree_builder().matches(snapshot.tree()));
    parser.feed_all("y</table>z").unwrap();

    let tree = parser.finish().unwrap().into_tree();
    let body = tree.body().unwrap();
    assert_eq!(
        tree.to_test_format_from(body),
        "| <b>\n|   <table>\n|     <tbody>\n|       <tr>\n|         <td>\n|           <i>\n|             \"xy\"\n|   \"z\"\n"
    );
}

#[test]
fn test_snapshot_and_restore() {
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    parser.feed_all("<!DOCTYPE html><p>one").unwrap();
    let snapshot = parser.snapshot();
    assert_eq!(snapshot.tree().insertion_mode(), InsertionMode::InBody);
    assert_eq!(snapshot.tree().open_elements(), 3);

    // More text in the same paragraph leaves the builder where it was.
    parser.feed_all("two").unwrap();
    assert!(parser.tree_builder().matches(snapshot.tree()));

    parser.feed_all("<table><tr>").unwrap();
    assert!(!parser.tree_builder().matches(snapshot.tree()));
    assert_eq!(parser.tree_builder().insertion_mode(), InsertionMode::InRow);

    parser.restore(&snapshot);
    assert!(parser.tree_builder().matches(snapshot.tree()));
    assert_eq!(parser.tree_builder().open_elements(), 3);

    // The document is not rolled back; new text goes to the restored <p>.
    parser.feed_all("three").unwrap();
    let tree = parser.finish().unwrap().into_tree();
    let p = tree.find_element(tree.root(), "p").unwrap();
    assert_eq!(tree.text_content(p), "onetwothree");
}

//! Property tests: the parser accepts any input, and how the input is split
//! into chunks never changes the result.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use sapling_html::{
    DomSink, FragmentContext, Parser, ParserOptions, parse_document, parse_document_with_issues,
    parse_fragment,
};

/// Pieces of markup that exercise the interesting insertion modes.
const PIECES: &[&str] = &[
    "<p>", "</p>", "<b>", "</b>", "<i>", "</i>", "<a href=x>", "</a>", "<table>", "</table>",
    "<tr>", "<td>", "</td>", "<caption>", "<col>", "<select>", "<option>", "</select>",
    "<svg>", "</svg>", "<math>", "<mi>", "<foreignObject>", "<template>", "</template>",
    "<frameset>", "<frame>", "<div>", "</div>", "<li>", "<dd>", "<h1>", "</h2>", "<pre>\n",
    "<textarea>", "<title>", "<script>", "</script>", "<noscript>", "<plaintext>", "<form>",
    "<button>", "<nobr>", "<html a=1>", "<body b=2>", "<head>", "<!DOCTYPE html>",
    "<!--c-->", "<![CDATA[x]]>", "&amp;", "&notin", "&#0;", "\0", "\r", "\n", " ", "x",
    "<br/>", "</br>", "<image>", "<input type=hidden>", "<meta charset=utf-8>",
];

/// Turn random bytes into tag soup.
fn soup(picks: &[u8]) -> String {
    picks
        .iter()
        .map(|&pick| PIECES[usize::from(pick) % PIECES.len()])
        .collect()
}

/// Feed `input` in pieces cut at each `cuts` offset (modulo the length).
fn parse_in_chunks(input: &str, cuts: &[usize]) -> String {
    let mut offsets: Vec<usize> = cuts
        .iter()
        .map(|&cut| cut % (input.len() + 1))
        .filter(|&cut| input.is_char_boundary(cut))
        .collect();
    offsets.sort_unstable();
    offsets.dedup();

    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    let mut start = 0;
    for end in offsets.into_iter().chain(std::iter::once(input.len())) {
        parser.feed_all(&input[start..end]).unwrap();
        start = end;
    }
    parser.finish().unwrap().into_tree().to_test_format()
}

#[quickcheck]
fn arbitrary_text_never_panics(input: String) -> bool {
    let (tree, _) = parse_document_with_issues(&input);
    tree.document_element().is_some()
}

#[quickcheck]
fn tag_soup_never_panics(picks: Vec<u8>) -> bool {
    let input = soup(&picks);
    let tree = parse_document(&input);
    let fragment = parse_fragment(&input, &FragmentContext::html("td"));
    tree.document_element().is_some() && !fragment.is_empty()
}

#[quickcheck]
fn chunking_does_not_change_the_tree(picks: Vec<u8>, cuts: Vec<usize>) -> TestResult {
    if picks.is_empty() {
        return TestResult::discard();
    }
    let input = soup(&picks);
    let whole = parse_document(&input).to_test_format();
    TestResult::from_bool(parse_in_chunks(&input, &cuts) == whole)
}

#[quickcheck]
fn chunking_arbitrary_text_does_not_change_the_tree(input: String, cuts: Vec<usize>) -> bool {
    parse_in_chunks(&input, &cuts) == parse_document(&input).to_test_format()
}

//! Integration tests for the HTML tokenizer.

use sapling_html::tokenizer::{
    Doctype, HandlerResult, InputBuffer, Tag, TokenHandler, Tokenizer, TokenizerState,
};
use sapling_html::{
    ElementName, ErrorCode, IssueCode, ParseError, ParseIssue, ParserOptions,
    XmlViolation, XmlViolationPolicy,
};

/// A token as recorded by [`Recorder`], with adjacent text merged.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    Comment(String),
    Doctype {
        name: Option<String>,
        public_id: Option<String>,
        system_id: Option<String>,
        force_quirks: bool,
    },
    Eof,
}

/// Records tokens, and switches content model for the elements whose text the
/// tree builder would tokenize specially.
#[derive(Debug, Default)]
struct Recorder {
    tokens: Vec<Token>,
    errors: Vec<ErrorCode>,
    suspend_after: Option<String>,
}

impl Recorder {
    fn text(&mut self, text: &str) {
        if let Some(Token::Text(existing)) = self.tokens.last_mut() {
            existing.push_str(text);
        } else {
            self.tokens.push(Token::Text(text.to_string()));
        }
    }
}

impl TokenHandler for Recorder {
    fn start_tag(&mut self, tag: Tag) -> HandlerResult {
        let name = tag.name.name().to_string();
        self.tokens.push(Token::StartTag {
            name: name.clone(),
            attributes: tag
                .attributes
                .iter()
                .map(|a| (a.name.name().to_string(), a.value.clone()))
                .collect(),
            self_closing: tag.self_closing,
        });
        if self.suspend_after.as_deref() == Some(name.as_str()) {
            return HandlerResult::Suspend;
        }
        let state = match name.as_str() {
            "title" | "textarea" => TokenizerState::RCDATA,
            "style" | "xmp" => TokenizerState::RAWTEXT,
            "script" => TokenizerState::ScriptData,
            "plaintext" => TokenizerState::PLAINTEXT,
            _ => return HandlerResult::Continue,
        };
        HandlerResult::SwitchTo {
            state,
            end_tag: Some(tag.name),
        }
    }

    fn end_tag(&mut self, name: ElementName) {
        self.tokens.push(Token::EndTag(name.name().to_string()));
    }

    fn characters(&mut self, text: &str) {
        self.text(text);
    }

    fn comment(&mut self, text: &str) {
        self.tokens.push(Token::Comment(text.to_string()));
    }

    fn doctype(&mut self, doctype: Doctype) {
        self.tokens.push(Token::Doctype {
            name: doctype.name,
            public_id: doctype.public_id,
            system_id: doctype.system_id,
            force_quirks: doctype.force_quirks,
        });
    }

    fn zero_originating_replacement_character(&mut self) {
        self.text("\0");
    }

    fn eof(&mut self) {
        self.tokens.push(Token::Eof);
    }

    fn parse_error(&mut self, issue: ParseIssue) {
        if let IssueCode::Lexical(code) = issue.code {
            self.errors.push(code);
        }
    }
}

/// Helper to tokenize chunks and return the recorder
fn tokenize_chunks_with(chunks: &[&str], options: &ParserOptions) -> Result<Recorder, ParseError> {
    let mut tokenizer = Tokenizer::new(Recorder::default(), options);
    tokenizer.start();
    for chunk in chunks {
        let mut buffer = InputBuffer::new(chunk);
        let _ = tokenizer.tokenize_buffer(&mut buffer)?;
    }
    tokenizer.eof()?;
    tokenizer.end();
    Ok(tokenizer.into_handler())
}

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    tokenize_chunks_with(&[input], &ParserOptions::new())
        .unwrap()
        .tokens
}

/// Helper to tokenize a string and return the lexical errors
fn errors(input: &str) -> Vec<ErrorCode> {
    tokenize_chunks_with(&[input], &ParserOptions::new())
        .unwrap()
        .errors
}

fn start(name: &str, attributes: &[(&str, &str)]) -> Token {
    Token::StartTag {
        name: name.to_string(),
        attributes: attributes
            .iter()
            .map(|&(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        self_closing: false,
    }
}

fn end(name: &str) -> Token {
    Token::EndTag(name.to_string())
}

fn text(data: &str) -> Token {
    Token::Text(data.to_string())
}

#[test]
fn test_plain_text() {
    assert_eq!(tokenize("Hello"), vec![text("Hello"), Token::Eof]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(
        tokens,
        vec![
            Token::Doctype {
                name: Some("html".to_string()),
                public_id: None,
                system_id: None,
                force_quirks: false,
            },
            Token::Eof
        ]
    );
}

#[test]
fn test_doctype_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_id: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_id: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_eof_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE html");
    assert!(matches!(tokens[0], Token::Doctype { force_quirks: true, .. }));
    assert_eq!(errors("<!DOCTYPE html"), vec![ErrorCode::EofInDoctype]);
}

#[test]
fn test_start_and_end_tags() {
    assert_eq!(
        tokenize("<DIV>x</Div>"),
        vec![start("div", &[]), text("x"), end("div"), Token::Eof]
    );
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
}

#[test]
fn test_comment() {
    assert_eq!(
        tokenize("<!-- hello -->"),
        vec![Token::Comment(" hello ".to_string()), Token::Eof]
    );
}

#[test]
fn test_bogus_comment() {
    assert_eq!(
        tokenize("<?xml version?>"),
        vec![Token::Comment("?xml version?".to_string()), Token::Eof]
    );
    assert_eq!(
        errors("<?xml?>"),
        vec![ErrorCode::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

#[test]
fn test_attribute_quoting_styles() {
    assert_eq!(
        tokenize(r#"<div a="1" b='2' c=3 d>"#)[0],
        start("div", &[("a", "1"), ("b", "2"), ("c", "3"), ("d", "")])
    );
}

#[test]
fn test_duplicate_attribute_first_wins() {
    assert_eq!(tokenize(r#"<p id=a ID=b>"#)[0], start("p", &[("id", "a")]));
    assert_eq!(errors(r#"<p id=a ID=b>"#), vec![ErrorCode::DuplicateAttribute]);
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    assert_eq!(errors("</p class=x>"), vec![ErrorCode::EndTagWithAttributes]);
}

#[test]
fn test_null_in_data_is_passed_through() {
    assert_eq!(tokenize("a\0b"), vec![text("a\0b"), Token::Eof]);
    assert_eq!(errors("a\0b"), vec![ErrorCode::UnexpectedNullCharacter]);
}

#[test]
fn test_crlf_normalized() {
    assert_eq!(tokenize("a\r\nb\rc"), vec![text("a\nb\nc"), Token::Eof]);
}

#[test]
fn test_crlf_split_across_chunks() {
    let recorder = tokenize_chunks_with(&["a\r", "\nb"], &ParserOptions::new()).unwrap();
    assert_eq!(recorder.tokens, vec![text("a\nb"), Token::Eof]);
}

#[test]
fn test_tag_split_across_chunks() {
    let recorder =
        tokenize_chunks_with(&["<di", "v cl", "ass=\"a", "b\">t&am", "p;"], &ParserOptions::new())
            .unwrap();
    assert_eq!(
        recorder.tokens,
        vec![start("div", &[("class", "ab")]), text("t&"), Token::Eof]
    );
}

#[test]
fn test_long_attribute_in_small_chunks() {
    let value = "v".repeat(10_000);
    let input = format!("<p data-x=\"{value}\">");
    let chunks: Vec<&str> = input
        .as_bytes()
        .chunks(7)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect();
    let recorder = tokenize_chunks_with(&chunks, &ParserOptions::new()).unwrap();
    assert_eq!(recorder.tokens[0], start("p", &[("data-x", &value)]));
}

#[test]
fn test_rcdata_title() {
    assert_eq!(
        tokenize("<title>a <b> &amp; c</title>"),
        vec![start("title", &[]), text("a <b> & c"), end("title"), Token::Eof]
    );
}

#[test]
fn test_rawtext_style_ignores_wrong_end_tag() {
    assert_eq!(
        tokenize("<style>a</div>b</style>"),
        vec![start("style", &[]), text("a</div>b"), end("style"), Token::Eof]
    );
}

#[test]
fn test_script_data_escaped() {
    assert_eq!(
        tokenize("<script><!--<script></script>--></script>"),
        vec![
            start("script", &[]),
            text("<!--<script></script>-->"),
            end("script"),
            Token::Eof
        ]
    );
}

#[test]
fn test_plaintext_never_ends() {
    assert_eq!(
        tokenize("<plaintext></plaintext>"),
        vec![start("plaintext", &[]), text("</plaintext>"), Token::Eof]
    );
}

#[test]
fn test_cdata_outside_foreign_content_is_a_comment() {
    assert_eq!(
        tokenize("<![CDATA[x]]>"),
        vec![Token::Comment("[CDATA[x]]".to_string()), Token::Eof]
    );
    assert_eq!(errors("<![CDATA[x]]>"), vec![ErrorCode::CdataInHtmlContent]);
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    assert_eq!(tokenize("a<div class="), vec![text("a"), Token::Eof]);
    assert_eq!(errors("<div class="), vec![ErrorCode::EofInTag]);
}

#[test]
fn test_suspend_stops_after_the_tag() {
    let input = "<meta><p>";
    let recorder = Recorder {
        suspend_after: Some("meta".to_string()),
        ..Recorder::default()
    };
    let mut tokenizer = Tokenizer::new(recorder, &ParserOptions::new());
    let mut buffer = InputBuffer::new(input);
    let outcome = tokenizer.tokenize_buffer(&mut buffer).unwrap();
    assert!(outcome.suspended);
    assert_eq!(buffer.start, "<meta>".len());
    assert_eq!(tokenizer.handler().tokens, vec![start("meta", &[])]);

    let outcome = tokenizer.tokenize_buffer(&mut buffer).unwrap();
    assert!(!outcome.suspended);
    assert!(buffer.is_exhausted());
    assert_eq!(tokenizer.handler().tokens.len(), 2);
}

#[test]
fn test_snapshot_restores_partial_tag() {
    let mut tokenizer = Tokenizer::new(Recorder::default(), &ParserOptions::new());
    let mut buffer = InputBuffer::new("<a hr");
    let _ = tokenizer.tokenize_buffer(&mut buffer).unwrap();
    let snapshot = tokenizer.snapshot();
    assert_eq!(snapshot.state(), TokenizerState::AttributeName);

    let mut wrong = InputBuffer::new("ef=x>");
    let _ = tokenizer.tokenize_buffer(&mut wrong).unwrap();
    tokenizer.restore(&snapshot);
    tokenizer.handler_mut().tokens.clear();

    let mut right = InputBuffer::new("eflang=y>");
    let _ = tokenizer.tokenize_buffer(&mut right).unwrap();
    assert_eq!(tokenizer.handler().tokens, vec![start("a", &[("hreflang", "y")])]);
}

#[test]
fn test_fatal_comment_policy() {
    let options = ParserOptions::new().with_comment_policy(XmlViolationPolicy::Fatal);
    let result = tokenize_chunks_with(&["<!-- a -- b -->"], &options);
    assert!(matches!(
        result,
        Err(ParseError::XmlViolation {
            violation: XmlViolation::CommentDoubleHyphen,
            ..
        })
    ));
}

#[test]
fn test_altered_comment_and_form_feed() {
    let options = ParserOptions::new().with_xml_policy(XmlViolationPolicy::AlterInfoset);
    let recorder = tokenize_chunks_with(&["<!--a--b-->x\x0Cy"], &options).unwrap();
    assert_eq!(
        recorder.tokens,
        vec![Token::Comment("a- -b".to_string()), text("x y"), Token::Eof]
    );
}

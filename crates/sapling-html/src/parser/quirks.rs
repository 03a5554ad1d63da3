//! Choosing the document's quirks mode from its DOCTYPE.
//!
//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)

use crate::names::DocumentMode;
use crate::tokenizer::Doctype;

/// "The public identifier starts with" any of these: quirks mode.
const QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "+//Silmaril//dtd html Pro v0r11 19970101//",
    "-//AS//DTD HTML 3.0 asWedit + extensions//",
    "-//AdvaSoft Ltd//DTD HTML 3.0 asWedit + extensions//",
    "-//IETF//DTD HTML 2.0 Level 1//",
    "-//IETF//DTD HTML 2.0 Level 2//",
    "-//IETF//DTD HTML 2.0 Strict Level 1//",
    "-//IETF//DTD HTML 2.0 Strict Level 2//",
    "-//IETF//DTD HTML 2.0 Strict//",
    "-//IETF//DTD HTML 2.0//",
    "-//IETF//DTD HTML 2.1E//",
    "-//IETF//DTD HTML 3.0//",
    "-//IETF//DTD HTML 3.2 Final//",
    "-//IETF//DTD HTML 3.2//",
    "-//IETF//DTD HTML 3//",
    "-//IETF//DTD HTML Level 0//",
    "-//IETF//DTD HTML Level 1//",
    "-//IETF//DTD HTML Level 2//",
    "-//IETF//DTD HTML Level 3//",
    "-//IETF//DTD HTML Strict Level 0//",
    "-//IETF//DTD HTML Strict Level 1//",
    "-//IETF//DTD HTML Strict Level 2//",
    "-//IETF//DTD HTML Strict Level 3//",
    "-//IETF//DTD HTML Strict//",
    "-//IETF//DTD HTML//",
    "-//Metrius//DTD Metrius Presentational//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 2.0 Tables//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 3.0 Tables//",
    "-//Netscape Comm. Corp.//DTD HTML//",
    "-//Netscape Comm. Corp.//DTD Strict HTML//",
    "-//O'Reilly and Associates//DTD HTML 2.0//",
    "-//O'Reilly and Associates//DTD HTML Extended 1.0//",
    "-//O'Reilly and Associates//DTD HTML Extended Relaxed 1.0//",
    "-//SQ//DTD HTML 2.0 HoTMetaL + extensions//",
    "-//SoftQuad Software//DTD HoTMetaL PRO 6.0::19990601::extensions to HTML 4.0//",
    "-//SoftQuad//DTD HoTMetaL PRO 4.0::19971010::extensions to HTML 4.0//",
    "-//Spyglass//DTD HTML 2.0 Extended//",
    "-//Sun Microsystems Corp.//DTD HotJava HTML//",
    "-//Sun Microsystems Corp.//DTD HotJava Strict HTML//",
    "-//W3C//DTD HTML 3 1995-03-24//",
    "-//W3C//DTD HTML 3.2 Draft//",
    "-//W3C//DTD HTML 3.2 Final//",
    "-//W3C//DTD HTML 3.2//",
    "-//W3C//DTD HTML 3.2S Draft//",
    "-//W3C//DTD HTML 4.0 Frameset//",
    "-//W3C//DTD HTML 4.0 Transitional//",
    "-//W3C//DTD HTML Experimental 19960712//",
    "-//W3C//DTD HTML Experimental 970421//",
    "-//W3C//DTD W3 HTML//",
    "-//W3O//DTD W3 HTML 3.0//",
    "-//WebTechs//DTD Mozilla HTML 2.0//",
    "-//WebTechs//DTD Mozilla HTML//",
];

/// "The public identifier is set to" one of these: quirks mode.
const QUIRKY_PUBLIC_IDS: &[&str] = &[
    "-//W3O//DTD W3 HTML Strict 3.0//EN//",
    "-/W3C/DTD HTML 4.0 Transitional/EN",
    "HTML",
];

/// "The system identifier is set to": quirks mode.
const QUIRKY_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

/// HTML 4.01 Frameset and Transitional: quirks without a system identifier,
/// limited quirks with one.
const HTML401_PREFIXES: &[&str] = &[
    "-//W3C//DTD HTML 4.01 Frameset//",
    "-//W3C//DTD HTML 4.01 Transitional//",
];

/// XHTML 1.0 Frameset and Transitional: always limited quirks.
const LIMITED_QUIRKY_PREFIXES: &[&str] = &[
    "-//W3C//DTD XHTML 1.0 Frameset//",
    "-//W3C//DTD XHTML 1.0 Transitional//",
];

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn starts_with_any(haystack: &str, prefixes: &[&str]) -> bool {
    prefixes
        .iter()
        .any(|prefix| starts_with_ignore_ascii_case(haystack, prefix))
}

/// "If the document is not an iframe srcdoc document, and the parser cannot
/// change the mode flag is false, and the DOCTYPE token matches one of the
/// conditions in the following list, then set the Document to quirks mode
/// ... Otherwise, if ... then set the Document to limited-quirks mode"
#[must_use]
pub fn document_mode_for(doctype: &Doctype, iframe_srcdoc: bool) -> DocumentMode {
    if iframe_srcdoc {
        return DocumentMode::NoQuirks;
    }
    let public = doctype.public_id.as_deref().unwrap_or_default();
    let system = doctype.system_id.as_deref();

    if doctype.force_quirks
        || doctype.name.as_deref() != Some("html")
        || QUIRKY_PUBLIC_IDS
            .iter()
            .any(|id| public.eq_ignore_ascii_case(id))
        || system.is_some_and(|system| system.eq_ignore_ascii_case(QUIRKY_SYSTEM_ID))
        || starts_with_any(public, QUIRKY_PUBLIC_PREFIXES)
        || (system.is_none() && starts_with_any(public, HTML401_PREFIXES))
    {
        return DocumentMode::Quirks;
    }

    if starts_with_any(public, LIMITED_QUIRKY_PREFIXES)
        || (system.is_some() && starts_with_any(public, HTML401_PREFIXES))
    {
        return DocumentMode::LimitedQuirks;
    }

    DocumentMode::NoQuirks
}

/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
#[must_use]
pub fn is_legacy_doctype(doctype: &Doctype) -> bool {
    doctype.name.as_deref() != Some("html")
        || doctype.public_id.is_some()
        || doctype
            .system_id
            .as_deref()
            .is_some_and(|system| system != "about:legacy-compat")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctype(name: &str, public: Option<&str>, system: Option<&str>) -> Doctype {
        Doctype {
            name: Some(name.to_string()),
            public_id: public.map(str::to_string),
            system_id: system.map(str::to_string),
            force_quirks: false,
        }
    }

    #[test]
    fn html5_doctype_is_standards() {
        let d = doctype("html", None, None);
        assert_eq!(document_mode_for(&d, false), DocumentMode::NoQuirks);
        assert!(!is_legacy_doctype(&d));
    }

    #[test]
    fn html401_transitional_depends_on_system_id() {
        let public = "-//W3C//DTD HTML 4.01 Transitional//EN";
        assert_eq!(
            document_mode_for(&doctype("html", Some(public), None), false),
            DocumentMode::Quirks
        );
        assert_eq!(
            document_mode_for(
                &doctype(
                    "html",
                    Some(public),
                    Some("http://www.w3.org/TR/html4/loose.dtd")
                ),
                false
            ),
            DocumentMode::LimitedQuirks
        );
    }

    #[test]
    fn prefixes_ignore_case() {
        let d = doctype("html", Some("-//ietf//dtd html//en"), None);
        assert_eq!(document_mode_for(&d, false), DocumentMode::Quirks);
    }

    #[test]
    fn xhtml_transitional_is_limited_quirks() {
        let d = doctype("html", Some("-//W3C//DTD XHTML 1.0 Transitional//EN"), None);
        assert_eq!(document_mode_for(&d, false), DocumentMode::LimitedQuirks);
        assert!(is_legacy_doctype(&d));
    }

    #[test]
    fn force_quirks_and_srcdoc() {
        let mut d = doctype("html", None, None);
        d.force_quirks = true;
        assert_eq!(document_mode_for(&d, false), DocumentMode::Quirks);
        assert_eq!(document_mode_for(&d, true), DocumentMode::NoQuirks);
        assert_eq!(
            document_mode_for(&doctype("svg", None, None), false),
            DocumentMode::Quirks
        );
    }

    #[test]
    fn legacy_compat_is_not_an_error() {
        assert!(!is_legacy_doctype(&doctype("html", None, Some("about:legacy-compat"))));
    }
}

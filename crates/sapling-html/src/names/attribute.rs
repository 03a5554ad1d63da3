//! Attribute name classification and the foreign-content adjustments.
//!
//! [§ 13.2.6.3 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//!
//! HTML lowercases every attribute name during tokenization. Elements in SVG
//! and MathML need some of those names case-restored, and a few prefixed names
//! (`xlink:href`, `xml:lang`, `xmlns`) become namespaced attributes.

use std::fmt;

use super::Namespace;

/// "let the attribute be a namespaced attribute, with the prefix being the
/// string in the second column, the local name being the string in the third
/// column, and the namespace being the namespace in the fourth column."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ForeignAdjustment {
    prefix: Option<&'static str>,
    local: &'static str,
    namespace: Namespace,
}

struct AttrEntry {
    name: &'static str,
    /// [§ 13.2.6.3 Adjust SVG attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-svg-attributes)
    svg: Option<&'static str>,
    /// [§ 13.2.6.3 Adjust MathML attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes)
    mathml: Option<&'static str>,
    /// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
    foreign: Option<ForeignAdjustment>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Known(u16),
    Custom(Box<str>),
}

/// Interned identity of an attribute name as it came out of the tokenizer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AttributeName(Repr);

impl AttributeName {
    /// Classify a (lowercase) attribute name.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        match ATTRIBUTES.binary_search_by(|e| e.name.cmp(name)) {
            Ok(index) => match u16::try_from(index) {
                Ok(index) => Self(Repr::Known(index)),
                Err(_) => Self(Repr::Custom(name.into())),
            },
            Err(_) => Self(Repr::Custom(name.into())),
        }
    }

    fn entry(&self) -> Option<&'static AttrEntry> {
        match &self.0 {
            Repr::Known(index) => ATTRIBUTES.get(usize::from(*index)),
            Repr::Custom(_) => None,
        }
    }

    /// The name as tokenized.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.0 {
            Repr::Known(_) => self.entry().map_or("", |e| e.name),
            Repr::Custom(name) => name,
        }
    }

    /// Whether the name is in the well-known table.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self.0, Repr::Known(_))
    }

    /// The local name on an element in `element_ns`.
    #[must_use]
    pub fn local_name(&self, element_ns: Namespace) -> &str {
        let adjusted = self.entry().and_then(|e| match element_ns {
            Namespace::Html => None,
            Namespace::Svg => e.foreign.map(|f| f.local).or(e.svg),
            _ => e.foreign.map(|f| f.local).or(e.mathml),
        });
        match adjusted {
            Some(local) => local,
            None => self.name(),
        }
    }

    /// The namespace prefix on an element in `element_ns`, if any.
    #[must_use]
    pub fn prefix(&self, element_ns: Namespace) -> Option<&'static str> {
        if element_ns == Namespace::Html {
            return None;
        }
        self.entry().and_then(|e| e.foreign).and_then(|f| f.prefix)
    }

    /// The attribute namespace on an element in `element_ns`, if any.
    #[must_use]
    pub fn namespace(&self, element_ns: Namespace) -> Option<Namespace> {
        if element_ns == Namespace::Html {
            return None;
        }
        self.entry().and_then(|e| e.foreign).map(|f| f.namespace)
    }

    /// `xmlns` or `xmlns:*`, which XML infosets cannot carry as attributes.
    #[must_use]
    pub fn is_xmlns(&self) -> bool {
        let name = self.name();
        name == "xmlns" || name.starts_with("xmlns:")
    }
}

impl fmt::Debug for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeName({})", self.name())
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute names with adjustments or tree-builder significance, sorted by name.
static ATTRIBUTES: [AttrEntry; 94] = [
    AttrEntry { name: "action", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "alt", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "attributename", svg: Some("attributeName"), mathml: None, foreign: None },
    AttrEntry { name: "attributetype", svg: Some("attributeType"), mathml: None, foreign: None },
    AttrEntry { name: "basefrequency", svg: Some("baseFrequency"), mathml: None, foreign: None },
    AttrEntry { name: "baseprofile", svg: Some("baseProfile"), mathml: None, foreign: None },
    AttrEntry { name: "calcmode", svg: Some("calcMode"), mathml: None, foreign: None },
    AttrEntry { name: "charset", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "class", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "clippathunits", svg: Some("clipPathUnits"), mathml: None, foreign: None },
    AttrEntry { name: "color", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "content", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "definitionurl", svg: None, mathml: Some("definitionURL"), foreign: None },
    AttrEntry { name: "diffuseconstant", svg: Some("diffuseConstant"), mathml: None, foreign: None },
    AttrEntry { name: "edgemode", svg: Some("edgeMode"), mathml: None, foreign: None },
    AttrEntry { name: "encoding", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "face", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "filterunits", svg: Some("filterUnits"), mathml: None, foreign: None },
    AttrEntry { name: "for", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "glyphref", svg: Some("glyphRef"), mathml: None, foreign: None },
    AttrEntry { name: "gradienttransform", svg: Some("gradientTransform"), mathml: None, foreign: None },
    AttrEntry { name: "gradientunits", svg: Some("gradientUnits"), mathml: None, foreign: None },
    AttrEntry { name: "height", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "href", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "http-equiv", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "id", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "kernelmatrix", svg: Some("kernelMatrix"), mathml: None, foreign: None },
    AttrEntry { name: "kernelunitlength", svg: Some("kernelUnitLength"), mathml: None, foreign: None },
    AttrEntry { name: "keypoints", svg: Some("keyPoints"), mathml: None, foreign: None },
    AttrEntry { name: "keysplines", svg: Some("keySplines"), mathml: None, foreign: None },
    AttrEntry { name: "keytimes", svg: Some("keyTimes"), mathml: None, foreign: None },
    AttrEntry { name: "lang", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "lengthadjust", svg: Some("lengthAdjust"), mathml: None, foreign: None },
    AttrEntry { name: "limitingconeangle", svg: Some("limitingConeAngle"), mathml: None, foreign: None },
    AttrEntry { name: "markerheight", svg: Some("markerHeight"), mathml: None, foreign: None },
    AttrEntry { name: "markerunits", svg: Some("markerUnits"), mathml: None, foreign: None },
    AttrEntry { name: "markerwidth", svg: Some("markerWidth"), mathml: None, foreign: None },
    AttrEntry { name: "maskcontentunits", svg: Some("maskContentUnits"), mathml: None, foreign: None },
    AttrEntry { name: "maskunits", svg: Some("maskUnits"), mathml: None, foreign: None },
    AttrEntry { name: "name", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "numoctaves", svg: Some("numOctaves"), mathml: None, foreign: None },
    AttrEntry { name: "pathlength", svg: Some("pathLength"), mathml: None, foreign: None },
    AttrEntry { name: "patterncontentunits", svg: Some("patternContentUnits"), mathml: None, foreign: None },
    AttrEntry { name: "patterntransform", svg: Some("patternTransform"), mathml: None, foreign: None },
    AttrEntry { name: "patternunits", svg: Some("patternUnits"), mathml: None, foreign: None },
    AttrEntry { name: "pointsatx", svg: Some("pointsAtX"), mathml: None, foreign: None },
    AttrEntry { name: "pointsaty", svg: Some("pointsAtY"), mathml: None, foreign: None },
    AttrEntry { name: "pointsatz", svg: Some("pointsAtZ"), mathml: None, foreign: None },
    AttrEntry { name: "preservealpha", svg: Some("preserveAlpha"), mathml: None, foreign: None },
    AttrEntry { name: "preserveaspectratio", svg: Some("preserveAspectRatio"), mathml: None, foreign: None },
    AttrEntry { name: "primitiveunits", svg: Some("primitiveUnits"), mathml: None, foreign: None },
    AttrEntry { name: "refx", svg: Some("refX"), mathml: None, foreign: None },
    AttrEntry { name: "refy", svg: Some("refY"), mathml: None, foreign: None },
    AttrEntry { name: "rel", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "repeatcount", svg: Some("repeatCount"), mathml: None, foreign: None },
    AttrEntry { name: "repeatdur", svg: Some("repeatDur"), mathml: None, foreign: None },
    AttrEntry { name: "requiredextensions", svg: Some("requiredExtensions"), mathml: None, foreign: None },
    AttrEntry { name: "requiredfeatures", svg: Some("requiredFeatures"), mathml: None, foreign: None },
    AttrEntry { name: "size", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "specularconstant", svg: Some("specularConstant"), mathml: None, foreign: None },
    AttrEntry { name: "specularexponent", svg: Some("specularExponent"), mathml: None, foreign: None },
    AttrEntry { name: "spreadmethod", svg: Some("spreadMethod"), mathml: None, foreign: None },
    AttrEntry { name: "src", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "srcdoc", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "startoffset", svg: Some("startOffset"), mathml: None, foreign: None },
    AttrEntry { name: "stddeviation", svg: Some("stdDeviation"), mathml: None, foreign: None },
    AttrEntry { name: "stitchtiles", svg: Some("stitchTiles"), mathml: None, foreign: None },
    AttrEntry { name: "style", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "surfacescale", svg: Some("surfaceScale"), mathml: None, foreign: None },
    AttrEntry { name: "systemlanguage", svg: Some("systemLanguage"), mathml: None, foreign: None },
    AttrEntry { name: "tablevalues", svg: Some("tableValues"), mathml: None, foreign: None },
    AttrEntry { name: "targetx", svg: Some("targetX"), mathml: None, foreign: None },
    AttrEntry { name: "targety", svg: Some("targetY"), mathml: None, foreign: None },
    AttrEntry { name: "textlength", svg: Some("textLength"), mathml: None, foreign: None },
    AttrEntry { name: "title", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "type", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "value", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "viewbox", svg: Some("viewBox"), mathml: None, foreign: None },
    AttrEntry { name: "viewtarget", svg: Some("viewTarget"), mathml: None, foreign: None },
    AttrEntry { name: "width", svg: None, mathml: None, foreign: None },
    AttrEntry { name: "xchannelselector", svg: Some("xChannelSelector"), mathml: None, foreign: None },
    AttrEntry { name: "xlink:actuate", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "actuate", namespace: Namespace::XLink }) },
    AttrEntry { name: "xlink:arcrole", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "arcrole", namespace: Namespace::XLink }) },
    AttrEntry { name: "xlink:href", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "href", namespace: Namespace::XLink }) },
    AttrEntry { name: "xlink:role", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "role", namespace: Namespace::XLink }) },
    AttrEntry { name: "xlink:show", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "show", namespace: Namespace::XLink }) },
    AttrEntry { name: "xlink:title", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "title", namespace: Namespace::XLink }) },
    AttrEntry { name: "xlink:type", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xlink"), local: "type", namespace: Namespace::XLink }) },
    AttrEntry { name: "xml:lang", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xml"), local: "lang", namespace: Namespace::Xml }) },
    AttrEntry { name: "xml:space", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xml"), local: "space", namespace: Namespace::Xml }) },
    AttrEntry { name: "xmlns", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: None, local: "xmlns", namespace: Namespace::XmlNs }) },
    AttrEntry { name: "xmlns:xlink", svg: None, mathml: None, foreign: Some(ForeignAdjustment { prefix: Some("xmlns"), local: "xlink", namespace: Namespace::XmlNs }) },
    AttrEntry { name: "ychannelselector", svg: Some("yChannelSelector"), mathml: None, foreign: None },
    AttrEntry { name: "zoomandpan", svg: Some("zoomAndPan"), mathml: None, foreign: None },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        for pair in ATTRIBUTES.windows(2) {
            assert!(pair[0].name < pair[1].name, "{}", pair[1].name);
        }
    }

    #[test]
    fn svg_attributes_are_case_fixed() {
        let name = AttributeName::classify("viewbox");
        assert_eq!(name.local_name(Namespace::Svg), "viewBox");
        assert_eq!(name.local_name(Namespace::Html), "viewbox");
        assert_eq!(name.local_name(Namespace::MathMl), "viewbox");
    }

    #[test]
    fn mathml_definition_url() {
        let name = AttributeName::classify("definitionurl");
        assert_eq!(name.local_name(Namespace::MathMl), "definitionURL");
        assert_eq!(name.local_name(Namespace::Svg), "definitionurl");
    }

    #[test]
    fn foreign_attributes_are_namespaced() {
        let href = AttributeName::classify("xlink:href");
        assert_eq!(href.local_name(Namespace::Svg), "href");
        assert_eq!(href.prefix(Namespace::Svg), Some("xlink"));
        assert_eq!(href.namespace(Namespace::MathMl), Some(Namespace::XLink));
        assert_eq!(href.namespace(Namespace::Html), None);
        assert_eq!(href.local_name(Namespace::Html), "xlink:href");

        let xmlns = AttributeName::classify("xmlns");
        assert_eq!(xmlns.prefix(Namespace::Svg), None);
        assert_eq!(xmlns.namespace(Namespace::Svg), Some(Namespace::XmlNs));
        assert!(xmlns.is_xmlns());
    }

    #[test]
    fn unknown_attribute_passes_through() {
        let name = AttributeName::classify("data-x");
        assert!(!name.is_known());
        assert_eq!(name.local_name(Namespace::Svg), "data-x");
        assert_eq!(name, AttributeName::classify("data-x"));
    }
}

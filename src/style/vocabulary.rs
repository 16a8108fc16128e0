//! Operator vocabulary shared by the expression translator.
//!
//! The token set mirrors the expression keywords accepted by the harp.gl
//! style renderer. It must stay in lockstep with that grammar: a token missing
//! here makes the translator treat it as a property name, and an extra token
//! makes a property name pass through untranslated.

use std::collections::HashSet;

use once_cell::sync::Lazy;

const OPERATORS: &[&str] = &[
    // Types
    "array",
    "boolean",
    "collator",
    "format",
    "literal",
    "number",
    "object",
    "string",
    "image",
    "to-boolean",
    "to-color",
    "to-number",
    "to-string",
    "typeof",
    // Feature data
    "feature-state",
    "geometry-type",
    "id",
    "line-progress",
    "properties",
    // Lookup
    "at",
    "get",
    "has",
    "in",
    "!in",
    "index-of",
    "length",
    "slice",
    // Decision
    "!",
    "!=",
    "<",
    "<=",
    "==",
    ">",
    ">=",
    "all",
    "any",
    "case",
    "match",
    "coalesce",
    // Ramps, scales, curves
    "interpolate",
    "interpolate-hcl",
    "interpolate-lab",
    "step",
    // Variable binding
    "let",
    "var",
    // String
    "concat",
    "downcase",
    "is-supported-script",
    "resolved-locale",
    "upcase",
    // Color
    "rgb",
    "rgba",
    // Math
    "-",
    "*",
    "/",
    "%",
    "^",
    "+",
    "abs",
    "acos",
    "asin",
    "atan",
    "ceil",
    "cos",
    "e",
    "floor",
    "ln",
    "ln2",
    "log10",
    "log2",
    "max",
    "min",
    "pi",
    "round",
    "sin",
    "sqrt",
    "tan",
    // Zoom, heatmap
    "zoom",
    "heatmap-density",
    // Legacy style function keywords
    "stops",
    "property",
    "base",
    "type",
    "default",
    "colorSpace",
    "$id",
];

/// Operators whose first argument is already an explicit name.
const NAME_FIRST: &[&str] = &[
    "get",
    "has",
    "feature-state",
    "let",
    "var",
    "image",
    "properties",
    "id",
    "geometry-type",
    "zoom",
    "line-progress",
    "heatmap-density",
];

/// Operators whose first argument is a plain string value.
const LITERAL_FIRST: &[&str] = &[
    "literal",
    "array",
    "boolean",
    "number",
    "object",
    "string",
    "to-boolean",
    "to-color",
    "to-number",
    "to-string",
    "typeof",
    "collator",
    "format",
    "concat",
    "downcase",
    "upcase",
    "is-supported-script",
    "resolved-locale",
    "index-of",
    "slice",
    "length",
    "coalesce",
];

static STANDARD: Lazy<Vocabulary> = Lazy::new(Vocabulary::build);

/// How a bare string in an operator's first argument slot is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Names a feature property implicitly; rewritten to `["get", name]`.
    Property,
    /// An explicit property, variable or image name; kept verbatim.
    Name,
    /// A string literal; kept verbatim.
    Literal,
}

/// Immutable set of recognized operator tokens plus the first-argument table.
#[derive(Debug)]
pub struct Vocabulary {
    operators: HashSet<&'static str>,
    name_first: HashSet<&'static str>,
    literal_first: HashSet<&'static str>,
}

impl Vocabulary {
    /// The vocabulary of the harp.gl expression grammar, built on first use.
    pub fn standard() -> &'static Vocabulary {
        &STANDARD
    }

    fn build() -> Self {
        Self {
            operators: OPERATORS.iter().copied().collect(),
            name_first: NAME_FIRST.iter().copied().collect(),
            literal_first: LITERAL_FIRST.iter().copied().collect(),
        }
    }

    pub fn is_operator(&self, token: &str) -> bool {
        self.operators.contains(token)
    }

    /// Argument kind of `operator`'s first slot, or `None` for unknown tokens.
    pub fn first_arg_kind(&self, operator: &str) -> Option<ArgKind> {
        if !self.is_operator(operator) {
            return None;
        }
        if self.name_first.contains(operator) {
            Some(ArgKind::Name)
        } else if self.literal_first.contains(operator) {
            Some(ArgKind::Literal)
        } else {
            Some(ArgKind::Property)
        }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let vocab = Vocabulary::standard();
        for token in ["get", "==", "!in", "interpolate-hcl", "$id", "colorSpace", "e"] {
            assert!(vocab.is_operator(token), "{token} should be an operator");
        }
        for token in ["class", "$type", "!has", "name", ""] {
            assert!(!vocab.is_operator(token), "{token} should not be an operator");
        }
    }

    #[test]
    fn test_no_duplicate_tokens() {
        assert_eq!(Vocabulary::standard().len(), OPERATORS.len());
    }

    #[test]
    fn test_argument_tables_are_subsets() {
        let vocab = Vocabulary::standard();
        for token in NAME_FIRST.iter().chain(LITERAL_FIRST) {
            assert!(vocab.is_operator(token), "{token} missing from operator set");
        }
        assert!(NAME_FIRST.iter().all(|t| !LITERAL_FIRST.contains(t)));
    }

    #[test]
    fn test_first_arg_kind() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.first_arg_kind("=="), Some(ArgKind::Property));
        assert_eq!(vocab.first_arg_kind("in"), Some(ArgKind::Property));
        assert_eq!(vocab.first_arg_kind("match"), Some(ArgKind::Property));
        assert_eq!(vocab.first_arg_kind("get"), Some(ArgKind::Name));
        assert_eq!(vocab.first_arg_kind("has"), Some(ArgKind::Name));
        assert_eq!(vocab.first_arg_kind("concat"), Some(ArgKind::Literal));
        assert_eq!(vocab.first_arg_kind("to-color"), Some(ArgKind::Literal));
        assert_eq!(vocab.first_arg_kind("class"), None);
    }
}

//! Building grammar tables by name.
//!
//! Rules may be referenced before they are defined; names are resolved in
//! [`GrammarBuilder::build`]. Inline elements (see the `element` module) are
//! turned into synthesized rules named by their canonical spelling, so `"?"`
//! used in ten places is one rule.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::element::Element;
use super::validate;
use super::{Grammar, GrammarError, Production, Rule, RuleId, SeqMember};
use crate::combinator::CharClass;

#[derive(Clone, Debug)]
enum Body {
    Terminal(CharClass),
    Literal(String),
    Sequence(Vec<(Arc<str>, String)>),
    Alternation(Vec<String>),
    Repeat {
        element: String,
        min: u32,
        max: Option<u32>,
    },
    Unimplemented,
}

#[derive(Clone, Debug)]
struct Pending {
    name: Arc<str>,
    body: Body,
}

/// Accumulates rule definitions and produces a validated [`Grammar`].
///
/// ```
/// use abnf_runtime::{GrammarBuilder, Input, Parser};
///
/// let mut b = GrammarBuilder::new();
/// b.sequence("pair", &["key", "\"=\"", "value"])
///     .range("key", 'a', 'z')
///     .range("value", '0', '9');
/// let grammar = b.build().unwrap();
///
/// let parser = Parser::new(&grammar, "pair").unwrap();
/// let input = Input::new("a=7");
/// assert_eq!(parser.parse(&input).unwrap().text(), "a=7");
/// ```
#[derive(Default)]
pub struct GrammarBuilder {
    rules: Vec<Pending>,
    index: FxHashMap<Arc<str>, usize>,
    errors: Vec<GrammarError>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule matching one token of `class`.
    pub fn terminal(&mut self, name: &str, class: CharClass) -> &mut Self {
        self.define(name, Body::Terminal(class));
        self
    }

    /// A rule matching exactly `c`.
    pub fn char(&mut self, name: &str, c: char) -> &mut Self {
        self.terminal(name, CharClass::Exact(c))
    }

    /// A rule matching `c` in either ASCII case.
    pub fn char_no_case(&mut self, name: &str, c: char) -> &mut Self {
        self.terminal(name, CharClass::CaseInsensitive(c.to_ascii_lowercase()))
    }

    /// A rule matching any token in `lo..=hi`.
    pub fn range(&mut self, name: &str, lo: char, hi: char) -> &mut Self {
        self.terminal(name, CharClass::Range(lo, hi))
    }

    /// A quoted literal.
    ///
    /// Each character becomes a terminal (`%x2F`, or `%i"a"` for a letter in
    /// a case-insensitive literal); a multi-character literal wraps a sequence
    /// of them named `<name>.chars`. Only ASCII letters fold case.
    pub fn literal(&mut self, name: &str, text: &str, case_sensitive: bool) -> &mut Self {
        if let Some(child) = self.literal_child(name, text, case_sensitive) {
            self.define(name, Body::Literal(child));
        }
        self
    }

    /// Every member in order. Members are inline elements; each is labelled
    /// `_<element>_<n>` where `n` counts repeats of that element in this
    /// sequence, starting at 1.
    pub fn sequence(&mut self, name: &str, members: &[&str]) -> &mut Self {
        let mut labelled = Vec::with_capacity(members.len());
        let mut seen: FxHashMap<String, u32> = FxHashMap::default();
        for spec in members {
            let Some(rule) = self.element(name, spec) else {
                continue;
            };
            let base = label_base(spec);
            let n = seen.entry(base.clone()).or_insert(0);
            *n += 1;
            labelled.push((Arc::from(format!("_{base}_{n}")), rule));
        }
        self.define(name, Body::Sequence(labelled));
        self
    }

    /// The first alternative that matches, tried in the order given.
    pub fn alternation(&mut self, name: &str, alternatives: &[&str]) -> &mut Self {
        let resolved = alternatives
            .iter()
            .filter_map(|spec| self.element(name, spec))
            .collect();
        self.define(name, Body::Alternation(resolved));
        self
    }

    /// `min` to `max` repetitions of `element`; `None` is unbounded.
    pub fn repeat(&mut self, name: &str, element: &str, min: u32, max: Option<u32>) -> &mut Self {
        if let Some(max) = max.filter(|&max| max < min) {
            self.errors.push(GrammarError::InvalidRepeat {
                rule: name.to_string(),
                min,
                max,
            });
            return self;
        }
        if let Some(element) = self.element(name, element) {
            self.define(name, Body::Repeat { element, min, max });
        }
        self
    }

    pub fn optional(&mut self, name: &str, element: &str) -> &mut Self {
        self.repeat(name, element, 0, Some(1))
    }

    /// Declare a rule whose production is not written yet.
    pub fn unimplemented(&mut self, name: &str) -> &mut Self {
        self.define(name, Body::Unimplemented);
        self
    }

    /// Resolve names and validate.
    ///
    /// Reports every undefined reference, duplicate and left-recursive cycle
    /// at once rather than stopping at the first.
    pub fn build(self) -> Result<Grammar, Vec<GrammarError>> {
        let GrammarBuilder {
            rules,
            index,
            mut errors,
        } = self;

        let mut resolve = |owner: &Arc<str>, target: &str| -> RuleId {
            if let Some(&i) = index.get(target) {
                return RuleId::new(super::index_to_u32(i));
            }
            errors.push(GrammarError::UndefinedRule {
                rule: owner.to_string(),
                missing: target.to_string(),
            });
            RuleId::ORIGIN
        };

        let resolved: Vec<Rule> = rules
            .iter()
            .map(|pending| {
                let name = &pending.name;
                let production = match &pending.body {
                    Body::Terminal(class) => Production::Terminal(*class),
                    Body::Literal(child) => Production::Literal(resolve(name, child.as_str())),
                    Body::Sequence(members) => Production::Sequence(
                        members
                            .iter()
                            .map(|(label, target)| SeqMember {
                                label: Arc::clone(label),
                                rule: resolve(name, target.as_str()),
                            })
                            .collect(),
                    ),
                    Body::Alternation(alternatives) => Production::Alternation(
                        alternatives.iter().map(|a| resolve(name, a.as_str())).collect(),
                    ),
                    Body::Repeat { element, min, max } => Production::Repeat {
                        rule: resolve(name, element.as_str()),
                        min: *min,
                        max: *max,
                    },
                    Body::Unimplemented => Production::Unimplemented,
                };
                Rule {
                    name: Arc::clone(name),
                    production,
                }
            })
            .collect();

        if !errors.is_empty() {
            return Err(errors);
        }

        let grammar = Grammar::from_rules(resolved);
        let all: Vec<RuleId> = grammar.iter().map(|(id, _)| id).collect();
        let cycles = validate::left_recursion(&grammar, &all);
        if !cycles.is_empty() {
            return Err(cycles);
        }

        debug!(rules = grammar.len(), "grammar built");
        Ok(grammar)
    }

    fn define(&mut self, name: &str, body: Body) {
        if self.index.contains_key(name) {
            self.errors.push(GrammarError::DuplicateRule {
                name: name.to_string(),
            });
            return;
        }
        self.insert(name, body);
    }

    /// Define a synthesized rule unless an identical name already exists.
    fn ensure(&mut self, name: &str, body: Body) {
        if !self.index.contains_key(name) {
            self.insert(name, body);
        }
    }

    fn insert(&mut self, name: &str, body: Body) {
        let name: Arc<str> = Arc::from(name);
        self.index.insert(Arc::clone(&name), self.rules.len());
        self.rules.push(Pending { name, body });
    }

    /// Materialize an inline element and return the rule name it lives under.
    fn element(&mut self, owner: &str, spec: &str) -> Option<String> {
        match Element::parse(spec) {
            Some(element) => Some(self.materialize(&element)),
            None => {
                self.errors.push(GrammarError::MalformedElement {
                    rule: owner.to_string(),
                    element: spec.to_string(),
                });
                None
            }
        }
    }

    fn materialize(&mut self, element: &Element) -> String {
        let name = element.to_string();
        match element {
            Element::Reference(_) => {}
            Element::Char(c) => self.ensure(&name, Body::Terminal(CharClass::Exact(*c))),
            Element::Range(lo, hi) => self.ensure(&name, Body::Terminal(CharClass::Range(*lo, *hi))),
            Element::Literal {
                text,
                case_sensitive,
            } => {
                if !self.index.contains_key(name.as_str()) {
                    if let Some(child) = self.literal_child(&name, text, *case_sensitive) {
                        self.insert(&name, Body::Literal(child));
                    }
                }
            }
            Element::Optional(inner) => {
                let element = self.materialize(inner);
                self.ensure(
                    &name,
                    Body::Repeat {
                        element,
                        min: 0,
                        max: Some(1),
                    },
                );
            }
            Element::Repeat { min, max, element } => {
                let element = self.materialize(element);
                self.ensure(
                    &name,
                    Body::Repeat {
                        element,
                        min: *min,
                        max: *max,
                    },
                );
            }
        }
        name
    }

    /// The child a literal named `name` wraps: one terminal, or a sequence
    /// of terminals for longer text.
    fn literal_child(&mut self, name: &str, text: &str, case_sensitive: bool) -> Option<String> {
        let mut chars = Vec::new();
        for c in text.chars() {
            chars.push((c, self.char_terminal(c, case_sensitive)));
        }
        match chars.as_slice() {
            [] => {
                self.errors.push(GrammarError::MalformedElement {
                    rule: name.to_string(),
                    element: String::new(),
                });
                None
            }
            [(_, single)] => Some(single.clone()),
            _ => {
                let seq_name = format!("{name}.chars");
                let mut seen: FxHashMap<char, u32> = FxHashMap::default();
                let members = chars
                    .into_iter()
                    .map(|(c, terminal)| {
                        let n = seen.entry(c).or_insert(0);
                        *n += 1;
                        (Arc::from(format!("_{c}_{n}")), terminal)
                    })
                    .collect();
                self.ensure(&seq_name, Body::Sequence(members));
                Some(seq_name)
            }
        }
    }

    fn char_terminal(&mut self, c: char, case_sensitive: bool) -> String {
        if !case_sensitive && c.is_ascii_alphabetic() {
            let lower = c.to_ascii_lowercase();
            let name = format!("%i\"{lower}\"");
            self.ensure(&name, Body::Terminal(CharClass::CaseInsensitive(lower)));
            name
        } else {
            let element = Element::Char(c);
            let name = element.to_string();
            self.ensure(&name, Body::Terminal(CharClass::Exact(c)));
            name
        }
    }
}

/// Element spelling used in member labels, with one layer of quotes removed.
fn label_base(spec: &str) -> String {
    let spec = spec.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = spec
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    spec.to_string()
}

//! Resolves the CSS classes and options of each item in a rendered list.
//!
//! A [`Rules`] set holds two kinds of rules, applied in insertion order:
//!
//! * fixed rules, whose value is a string, keyed by a [`RuleKey`]: unnamed
//!   rules apply to every item, `post<N>` rules only to the item at global
//!   position `N`, and named rules set a named context on every item;
//! * callback rules, whose value is computed from the [`RenderItem`] being
//!   classified, keyed by an optional context name.
//!
//! Results accumulate in an [`Assigned`]: an ordered list of unnamed values
//! plus a map of named contexts, where later rules overwrite earlier ones.

use crate::post::RenderItem;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// The context name that selects all unnamed classes.
pub const ALL: &str = "all";

/// The key of a fixed rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleKey {
    /// Applies to every item, appended to its unnamed values.
    Unnamed,

    /// Applies only to the item at this zero-based position, appended to its
    /// unnamed values.
    Position(usize),

    /// Sets this named context on every item.
    Named(String),
}

impl RuleKey {
    /// Parses a string key: `post<N>` is positional, anything else is a
    /// named context.
    pub fn parse(key: &str) -> RuleKey {
        match key.strip_prefix("post").map(str::parse::<usize>) {
            Some(Ok(position)) => RuleKey::Position(position),
            _ => RuleKey::Named(key.to_owned()),
        }
    }
}

/// A rule whose value is computed per item.
pub type RuleFn = Box<dyn Fn(&RenderItem<'_>) -> String>;

/// An ordered set of fixed and callback rules.
#[derive(Default)]
pub struct Rules {
    fixed: Vec<(RuleKey, String)>,
    variable: Vec<(Option<String>, RuleFn)>,
}

impl Rules {
    pub fn new() -> Rules {
        Rules::default()
    }

    /// Adds a fixed rule. A named or positional key that is already present
    /// has its value replaced in place; unnamed rules always append.
    pub fn insert<V: Into<String>>(
        &mut self,
        key: RuleKey,
        value: V,
    ) -> &mut Rules {
        let value = value.into();
        if key != RuleKey::Unnamed {
            if let Some(existing) =
                self.fixed.iter_mut().find(|(k, _)| *k == key)
            {
                existing.1 = value;
                return self;
            }
        }
        self.fixed.push((key, value));
        self
    }

    /// Adds a fixed rule keyed by a string; see [`RuleKey::parse`].
    pub fn set<V: Into<String>>(
        &mut self,
        key: &str,
        value: V,
    ) -> &mut Rules {
        self.insert(RuleKey::parse(key), value)
    }

    /// Adds an unnamed fixed rule.
    pub fn push<V: Into<String>>(&mut self, value: V) -> &mut Rules {
        self.insert(RuleKey::Unnamed, value)
    }

    /// Adds a callback rule. A named callback replaces an earlier one with
    /// the same name; unnamed callbacks always append.
    pub fn callback<F>(&mut self, name: Option<&str>, f: F) -> &mut Rules
    where
        F: Fn(&RenderItem<'_>) -> String + 'static,
    {
        let name = name.map(str::to_owned);
        match name {
            Some(_) => {
                match self.variable.iter_mut().find(|(k, _)| *k == name) {
                    Some(existing) => existing.1 = Box::new(f),
                    None => self.variable.push((name, Box::new(f))),
                }
            }
            None => self.variable.push((None, Box::new(f))),
        }
        self
    }

    /// Merges `other` into this set, rule by rule.
    pub fn merge(&mut self, other: Rules) -> &mut Rules {
        for (key, value) in other.fixed {
            self.insert(key, value);
        }
        for (name, f) in other.variable {
            let existing = match &name {
                Some(_) => {
                    self.variable.iter_mut().find(|(k, _)| *k == name)
                }
                None => None,
            };
            match existing {
                Some(existing) => existing.1 = f,
                None => self.variable.push((name, f)),
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.variable.is_empty()
    }

    pub fn fixed(&self) -> &[(RuleKey, String)] {
        &self.fixed
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Rules")
            .field("fixed", &self.fixed)
            .field(
                "variable",
                &self.variable.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A key as written in a YAML rule map: integers are unnamed, strings are
/// parsed with [`RuleKey::parse`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    // the value only selects this variant; unnamed rules keep map order
    Index(#[allow(dead_code)] i64),
    Name(String),
}

impl<'de> Deserialize<'de> for Rules {
    /// Deserializes the fixed rules of a [`Rules`] set from a map, keeping
    /// the map's order.
    fn deserialize<D>(deserializer: D) -> Result<Rules, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = Rules;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of class or option rules")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Rules, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rules = Rules::new();
                while let Some((key, value)) =
                    map.next_entry::<RawKey, String>()?
                {
                    match key {
                        RawKey::Index(_) => rules.push(value),
                        RawKey::Name(name) => rules.set(&name, value),
                    };
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

/// The values assigned to one item: ordered unnamed values plus named
/// contexts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assigned {
    unnamed: Vec<String>,
    named: HashMap<String, String>,
}

impl Assigned {
    pub fn push(&mut self, value: String) {
        self.unnamed.push(value);
    }

    pub fn set(&mut self, context: &str, value: String) {
        self.named.insert(context.to_owned(), value);
    }

    pub fn unnamed(&self) -> &[String] {
        &self.unnamed
    }

    /// Returns the value of a named context.
    pub fn named(&self, context: &str) -> Option<&str> {
        self.named.get(context).map(String::as_str)
    }

    /// Joins the unnamed values with single spaces. Named contexts are not
    /// included.
    pub fn joined(&self) -> String {
        self.unnamed.join(" ")
    }

    /// Looks up `context` the way class lists are addressed: [`ALL`] joins
    /// the unnamed values, anything else is a named context.
    pub fn get(&self, context: &str) -> Option<String> {
        match context {
            ALL => Some(self.joined()),
            _ => self.named(context).map(str::to_owned),
        }
    }
}

/// Which of an item's assignments a rule set targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Classes,
    Options,
}

/// Applies `rules` to the `slot` assignments of `item`: fixed rules first,
/// then callbacks, each in insertion order.
pub fn apply(item: &mut RenderItem<'_>, slot: Slot, rules: &Rules) {
    let position = item.position();
    for (key, value) in &rules.fixed {
        let assigned = item.assigned_mut(slot);
        match key {
            RuleKey::Unnamed => assigned.push(value.clone()),
            RuleKey::Position(n) if *n == position => {
                assigned.push(value.clone())
            }
            RuleKey::Position(_) => {}
            RuleKey::Named(context) => assigned.set(context, value.clone()),
        }
    }

    for (name, f) in &rules.variable {
        let value = f(&*item);
        let assigned = item.assigned_mut(slot);
        match name {
            None => assigned.push(value),
            Some(context) => assigned.set(context, value),
        }
    }
}

/// Classifies `item`: class rules first, then option rules.
pub fn assign(item: &mut RenderItem<'_>, classes: &Rules, options: &Rules) {
    apply(item, Slot::Classes, classes);
    apply(item, Slot::Options, options);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::test_support::Fixture;
    use crate::item::ContentItem;

    #[test]
    fn test_parse_key() {
        assert_eq!(RuleKey::Position(3), RuleKey::parse("post3"));
        assert_eq!(RuleKey::Named(String::from("post")), RuleKey::parse("post"));
        assert_eq!(RuleKey::Named(String::from("postx")), RuleKey::parse("postx"));
        assert_eq!(RuleKey::Named(String::from("title")), RuleKey::parse("title"));
    }

    #[test]
    fn test_insert_replaces_named_in_place() {
        let mut rules = Rules::new();
        rules.set("title", "a").push("x").set("title", "b").push("x");
        assert_eq!(
            &[
                (RuleKey::Named(String::from("title")), String::from("b")),
                (RuleKey::Unnamed, String::from("x")),
                (RuleKey::Unnamed, String::from("x")),
            ],
            rules.fixed()
        );
    }

    #[test]
    fn test_fixed_rules() {
        let fixture = Fixture::new(vec![ContentItem::new(1, "One")]);
        let context = fixture.context();
        let mut classes = Rules::new();
        classes
            .push("entry")
            .set("post0", "first")
            .set("post1", "second")
            .set("title", "entry-title");

        let mut item = fixture.render_item(&context, 0, 0);
        assign(&mut item, &classes, &Rules::new());
        assert_eq!(Some(String::from("entry first")), item.classes(ALL));
        assert_eq!(Some(String::from("entry-title")), item.classes("title"));
        assert_eq!(None, item.classes("missing"));

        let mut item = fixture.render_item(&context, 0, 1);
        assign(&mut item, &classes, &Rules::new());
        assert_eq!(Some(String::from("entry second")), item.classes(ALL));
    }

    #[test]
    fn test_callback_rules_see_item() {
        let fixture = Fixture::new(vec![ContentItem::new(42, "Answer")]);
        let context = fixture.context();
        let mut classes = Rules::new();
        classes
            .set("title", "plain")
            .callback(None, |item| format!("post-{}", item.item().id))
            .callback(Some("title"), |item| {
                format!("{}-title", item.classes(ALL).unwrap_or_default())
            });

        let mut item = fixture.render_item(&context, 0, 0);
        assign(&mut item, &classes, &Rules::new());
        assert_eq!(Some(String::from("post-42")), item.classes(ALL));
        assert_eq!(Some(String::from("post-42-title")), item.classes("title"));
    }

    #[test]
    fn test_options() {
        let fixture = Fixture::new(vec![ContentItem::new(1, "One")]);
        let context = fixture.context();
        let mut options = Rules::new();
        options
            .push("compact")
            .set("post0", "featured")
            .set("image_size", "thumbnail")
            .callback(Some("heading"), |item| format!("h{}", item.position() + 2));

        let mut item = fixture.render_item(&context, 0, 0);
        assign(&mut item, &Rules::new(), &options);
        assert_eq!(&[String::from("compact"), String::from("featured")], item.options());
        assert_eq!(Some("thumbnail"), item.option("image_size"));
        assert_eq!(Some("h2"), item.option("heading"));
        assert_eq!(None, item.option("missing"));
        assert_eq!(Some(String::new()), item.classes(ALL));
    }

    #[test]
    fn test_merge() {
        let mut rules = Rules::new();
        rules.set("title", "a").callback(Some("x"), |_| String::from("1"));
        let mut other = Rules::new();
        other
            .set("title", "b")
            .push("c")
            .callback(Some("x"), |_| String::from("2"))
            .callback(None, |_| String::from("3"));
        rules.merge(other);
        assert_eq!(2, rules.fixed().len());
        assert_eq!(2, rules.variable.len());
        assert_eq!(String::from("b"), rules.fixed()[0].1);
    }

    #[test]
    fn test_deserialize_keeps_order() -> Result<(), serde_yaml::Error> {
        let rules: Rules =
            serde_yaml::from_str("0: entry\npost2: third\ntitle: h\n1: card\n")?;
        assert_eq!(
            &[
                (RuleKey::Unnamed, String::from("entry")),
                (RuleKey::Position(2), String::from("third")),
                (RuleKey::Named(String::from("title")), String::from("h")),
                (RuleKey::Unnamed, String::from("card")),
            ],
            rules.fixed()
        );
        Ok(())
    }
}

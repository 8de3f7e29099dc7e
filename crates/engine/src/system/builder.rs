//! Turns a decoded rule tree into a [`BidTree`].

use crate::condition::{
    Condition, EvaluationRange, Formula, LegacyGroups, ShapePattern, SuitLengthRange,
};
use crate::error::{BidPath, BuildError, ConditionError};
use crate::system::bid_tree::{Bid, BidId, BidTree};
use crate::system::rule_node::RuleNode;
use bridge_types::{Call, Evaluator, HcpScale, ShapePoints, Strain, Suit};
use std::str::FromStr;

const BID_CHILD_TAGS: [&str; 7] = ["value", "desc", "and", "or", "not", "condition", "bid"];

/// Builds the bid tree for a `system` root node.
pub fn build_system(root: &RuleNode) -> Result<BidTree, BuildError> {
    let at_root = |source: ConditionError| BuildError::Condition {
        path: BidPath::default(),
        source,
    };
    if root.tag != "system" {
        return Err(at_root(ConditionError::UnknownTag(root.tag.clone())));
    }
    let scale = match root.attr("hcp") {
        None => HcpScale::Standard,
        Some(name) => HcpScale::from_name(name).ok_or_else(|| {
            at_root(ConditionError::UnknownAttributeValue {
                attribute: "hcp".into(),
                value: name.into(),
            })
        })?,
    };
    let shape_points = match root.attr("shape") {
        None => ShapePoints::Standard,
        Some(name) => ShapePoints::from_name(name).ok_or_else(|| {
            at_root(ConditionError::UnknownAttributeValue {
                attribute: "shape".into(),
                value: name.into(),
            })
        })?,
    };

    let mut builder = SystemBuilder {
        scale,
        shape_points,
        tree: BidTree::new(),
    };
    for child in &root.children {
        if child.tag != "bid" {
            return Err(at_root(ConditionError::UnknownTag(child.tag.clone())));
        }
        builder.build_bid(child, None, &BidPath::default())?;
    }
    tracing::info!(
        bids = builder.tree.len(),
        ?scale,
        ?shape_points,
        "built bidding system"
    );
    Ok(builder.tree)
}

struct SystemBuilder {
    scale: HcpScale,
    shape_points: ShapePoints,
    tree: BidTree,
}

impl SystemBuilder {
    fn build_bid(
        &mut self,
        node: &RuleNode,
        parent: Option<BidId>,
        parent_path: &BidPath,
    ) -> Result<(), BuildError> {
        let denotation = node
            .field("value")
            .map(str::to_lowercase)
            .unwrap_or_default();
        let path = parent_path.child(denotation.clone());
        // The source id, when present, only decorates error messages.
        let source_id = node.attr("id").map(String::from);
        let error_path = || match &source_id {
            Some(id) => parent_path.child(format!("{} [id {id}]", display_denotation(&denotation))),
            None => parent_path.child(display_denotation(&denotation)),
        };

        if denotation.is_empty() {
            return Err(BuildError::Condition {
                path: error_path(),
                source: ConditionError::MissingField {
                    tag: "bid".into(),
                    field: "value".into(),
                },
            });
        }
        let call = parse_denotation(&denotation, error_path())?;
        let condition = self
            .bid_condition(node)
            .map_err(|source| BuildError::Condition {
                path: error_path(),
                source,
            })?;
        let description = node.field("desc").unwrap_or_default().to_string();

        let mut bid = Bid::new(call, denotation, description, condition);
        bid.source_id = source_id;
        let id = self.tree.insert(parent, bid)?;
        tracing::debug!(%path, "built bid");

        for child in node.children_tagged("bid") {
            self.build_bid(child, Some(id), &path)?;
        }
        Ok(())
    }

    fn bid_condition(&self, node: &RuleNode) -> Result<Condition, ConditionError> {
        if let Some(unknown) = node
            .children
            .iter()
            .find(|c| !BID_CHILD_TAGS.contains(&c.tag.as_str()))
        {
            return Err(ConditionError::UnknownTag(unknown.tag.clone()));
        }

        let logic: Vec<&RuleNode> = node
            .children
            .iter()
            .filter(|c| is_logic_tag(&c.tag))
            .collect();
        let groups: Vec<&RuleNode> = node.children_tagged("condition").collect();
        if !logic.is_empty() && !groups.is_empty() {
            return Err(ConditionError::MixedConditionStyles);
        }

        if !logic.is_empty() {
            let mut conditions = logic
                .into_iter()
                .map(|n| self.logic(n))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(match conditions.len() {
                1 => conditions.remove(0),
                _ => Condition::And(conditions),
            });
        }

        let mut legacy = LegacyGroups {
            include: Vec::new(),
            exclude: Vec::new(),
        };
        for group in groups {
            let mut conditions = Vec::new();
            for child in &group.children {
                conditions.extend(self.leaf(child)?);
            }
            match group.attr("type").map(str::trim) {
                Some("include") => legacy.include.push(conditions),
                Some("exclude") => legacy.exclude.push(conditions),
                other => {
                    return Err(ConditionError::InvalidGroupType(
                        other.unwrap_or_default().to_string(),
                    ))
                }
            }
        }
        Ok(Condition::IncludeExclude(legacy))
    }

    fn logic(&self, node: &RuleNode) -> Result<Condition, ConditionError> {
        let mut children = Vec::new();
        for child in &node.children {
            if is_logic_tag(&child.tag) {
                children.push(self.logic(child)?);
            } else {
                children.extend(self.leaf(child)?);
            }
        }
        match node.tag.as_str() {
            "and" => Ok(Condition::And(children)),
            "or" => Ok(Condition::Or(children)),
            "not" => match <[Condition; 1]>::try_from(children) {
                Ok([child]) => Ok(Condition::Not(Box::new(child))),
                Err(children) => Err(ConditionError::NotArity(children.len())),
            },
            other => Err(ConditionError::UnknownTag(other.to_string())),
        }
    }

    /// Simple conditions for one node; an untyped `shape` yields none.
    fn leaf(&self, node: &RuleNode) -> Result<Vec<Condition>, ConditionError> {
        match node.tag.as_str() {
            "hcp" | "points" | "tricks" => Ok(vec![self.evaluation(node)?]),
            "evaluation" => node
                .children
                .iter()
                .map(|method| self.evaluation(method))
                .collect(),
            "shape" => Ok(shape(node)?.into_iter().collect()),
            "formula" => {
                let formula = Formula::compile(required_text(node)?)?;
                Ok(vec![Condition::Formula(formula)])
            }
            other => Err(ConditionError::UnknownTag(other.to_string())),
        }
    }

    fn evaluation(&self, node: &RuleNode) -> Result<Condition, ConditionError> {
        let evaluator = match node.tag.as_str() {
            "hcp" => Evaluator::Hcp(self.scale),
            "points" => Evaluator::Points(self.scale, self.shape_points),
            "tricks" => Evaluator::Tricks,
            other => return Err(ConditionError::UnknownTag(other.to_string())),
        };
        let range = EvaluationRange::new(evaluator, number(node, "min")?, number(node, "max")?)?;
        Ok(Condition::Evaluation(range))
    }
}

fn shape(node: &RuleNode) -> Result<Option<Condition>, ConditionError> {
    let Some(kind) = node.attr("type").map(str::trim) else {
        tracing::warn!("skipping shape definition without a type");
        return Ok(None);
    };
    if let Some(suit) = Suit::from_name(kind) {
        let range = SuitLengthRange::new(suit, number(node, "min")?, number(node, "max")?)?;
        return Ok(Some(Condition::SuitLength(range)));
    }
    let condition = match kind {
        "shape" => Condition::Shape(ShapePattern::parse(required_text(node)?)?),
        "general" => Condition::Shape(ShapePattern::category(required_text(node)?)?),
        "formula" => Condition::Formula(Formula::compile(required_text(node)?)?),
        "longer_than" | "strictly_longer_than" => {
            let longer = suit_field(node, "longer_suit")?;
            let shorter = suit_field(node, "shorter_suit")?;
            let op = if kind == "longer_than" { "<=" } else { "<" };
            Condition::Formula(Formula::compile(&format!(
                "{}{op}{}",
                shorter.name(),
                longer.name()
            ))?)
        }
        other => {
            return Err(ConditionError::UnknownAttributeValue {
                attribute: "type".into(),
                value: other.into(),
            })
        }
    };
    Ok(Some(condition))
}

fn is_logic_tag(tag: &str) -> bool {
    matches!(tag, "and" | "or" | "not")
}

fn display_denotation(denotation: &str) -> String {
    if denotation.is_empty() {
        "?".to_string()
    } else {
        denotation.to_string()
    }
}

fn parse_denotation(denotation: &str, path: BidPath) -> Result<Call, BuildError> {
    denotation.parse::<Call>().map_err(|_| {
        let mut chars = denotation.chars();
        match (chars.next(), chars.next()) {
            (Some(level), Some(strain))
                if level.is_ascii_digit() && Strain::from_char(strain).is_none() =>
            {
                BuildError::UnrecognizedStrain {
                    path,
                    text: denotation.to_string(),
                }
            }
            _ => BuildError::InvalidDenotation {
                path,
                text: denotation.to_string(),
            },
        }
    })
}

fn required_text(node: &RuleNode) -> Result<&str, ConditionError> {
    node.text().ok_or_else(|| ConditionError::MissingField {
        tag: node.tag.clone(),
        field: "text".into(),
    })
}

fn number<T: FromStr>(node: &RuleNode, field: &str) -> Result<Option<T>, ConditionError> {
    node.field(field)
        .map(|text| {
            text.parse::<T>().map_err(|_| ConditionError::InvalidNumber {
                field: field.to_string(),
                text: text.to_string(),
            })
        })
        .transpose()
}

fn suit_field(node: &RuleNode, field: &str) -> Result<Suit, ConditionError> {
    let text = node.field(field).ok_or_else(|| ConditionError::MissingField {
        tag: node.tag.clone(),
        field: field.to_string(),
    })?;
    Suit::from_name(text).ok_or_else(|| ConditionError::UnknownAttributeValue {
        attribute: field.to_string(),
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_types::Hand;

    fn hcp(min: u32, max: u32) -> RuleNode {
        RuleNode::new("hcp").with_attr("min", min).with_attr("max", max)
    }

    fn general(category: &str) -> RuleNode {
        RuleNode::new("shape")
            .with_attr("type", "general")
            .with_text(category)
    }

    fn bid(value: &str) -> RuleNode {
        RuleNode::new("bid").with_attr("value", value)
    }

    fn system(bids: Vec<RuleNode>) -> RuleNode {
        bids.into_iter()
            .fold(RuleNode::new("system").with_attr("hcp", "standard"), RuleNode::with_child)
    }

    #[test]
    fn test_explicit_logic() {
        let root = system(vec![bid("1N")
            .with_attr("desc", "15-17 balanced")
            .with_child(RuleNode::new("and").with_child(hcp(15, 17)).with_child(general("balanced")))]);
        let tree = build_system(&root).unwrap();
        let one_n = tree.opening("1n").unwrap();
        assert_eq!(one_n.description, "15-17 balanced");
        assert_eq!(one_n.condition.to_string(), "AND (hcp 15..=17, shape balanced)");
        assert!(one_n.accept(&Hand::from_pbn("AQ3.KJ2.KT52.Q32")));
        assert!(!one_n.accept(&Hand::from_pbn("KQJ3.AK32.T5.J32")));
    }

    #[test]
    fn test_xml_shaped_fields() {
        // <bid><value>1s</value><desc>..</desc><condition type="include">...
        let root = system(vec![RuleNode::new("bid")
            .with_child(RuleNode::new("value").with_text("1s"))
            .with_child(RuleNode::new("desc").with_text("five spades"))
            .with_child(
                RuleNode::new("condition")
                    .with_attr("type", "include")
                    .with_child(
                        RuleNode::new("evaluation").with_child(
                            RuleNode::new("points")
                                .with_child(RuleNode::new("min").with_text("13")),
                        ),
                    )
                    .with_child(
                        RuleNode::new("shape")
                            .with_attr("type", "spades")
                            .with_child(RuleNode::new("min").with_text("5")),
                    ),
            )]);
        let tree = build_system(&root).unwrap();
        let one_s = tree.opening("1s").unwrap();
        assert_eq!(one_s.description, "five spades");
        assert_eq!(one_s.condition.leaf_count(), 2);
        assert!(one_s.accept(&Hand::from_pbn("AKJ32.K32.Q2.J32")));
        assert!(!one_s.accept(&Hand::from_pbn("AKJ3.K32.Q32.J32")));
    }

    #[test]
    fn test_rebids_nest() {
        let root = system(vec![bid("1n")
            .with_child(RuleNode::new("and").with_child(hcp(15, 17)))
            .with_child(
                bid("2c").with_child(
                    RuleNode::new("and").with_child(
                        RuleNode::new("formula").with_text("hearts >= 4 or spades >= 4"),
                    ),
                ),
            )]);
        let err = build_system(&root).unwrap_err();
        assert_eq!(err.path().to_string(), "1n > 2c");
        assert!(matches!(
            err,
            BuildError::Condition {
                source: ConditionError::Formula(_),
                ..
            }
        ));
    }

    #[test]
    fn test_longer_than_builds_formula() {
        let root = system(vec![bid("1h").with_child(
            RuleNode::new("and").with_child(
                RuleNode::new("shape")
                    .with_attr("type", "strictly_longer_than")
                    .with_attr("longer_suit", "hearts")
                    .with_attr("shorter_suit", "spades"),
            ),
        )]);
        let tree = build_system(&root).unwrap();
        let one_h = tree.opening("1h").unwrap();
        assert_eq!(one_h.condition.to_string(), "AND (formula s<h)");
        assert!(one_h.accept(&Hand::from_pbn("K3.AK432.T5.J432")));
        assert!(!one_h.accept(&Hand::from_pbn("KQJ3.AK32.T5.J32")));
    }

    #[test]
    fn test_untyped_shape_is_skipped() {
        let root = system(vec![bid("1c").with_child(
            RuleNode::new("condition")
                .with_attr("type", "include")
                .with_child(RuleNode::new("shape"))
                .with_child(hcp(12, 21)),
        )]);
        let tree = build_system(&root).unwrap();
        assert_eq!(tree.opening("1c").unwrap().condition.leaf_count(), 1);
    }

    #[test]
    fn test_not_arity() {
        let root = system(vec![bid("1c").with_child(
            RuleNode::new("not").with_child(hcp(0, 11)).with_child(general("any")),
        )]);
        assert!(matches!(
            build_system(&root),
            Err(BuildError::Condition {
                source: ConditionError::NotArity(2),
                ..
            })
        ));
    }

    #[test]
    fn test_mixed_styles_rejected() {
        let root = system(vec![bid("1c")
            .with_child(RuleNode::new("and"))
            .with_child(RuleNode::new("condition").with_attr("type", "include"))]);
        assert!(matches!(
            build_system(&root),
            Err(BuildError::Condition {
                source: ConditionError::MixedConditionStyles,
                ..
            })
        ));
    }

    #[test]
    fn test_denotation_errors() {
        let root = system(vec![bid("1x")]);
        assert!(matches!(
            build_system(&root),
            Err(BuildError::UnrecognizedStrain { .. })
        ));
        let root = system(vec![bid("double")]);
        assert!(matches!(
            build_system(&root),
            Err(BuildError::InvalidDenotation { .. })
        ));
        let root = system(vec![RuleNode::new("bid").with_attr("id", "17")]);
        let err = build_system(&root).unwrap_err();
        assert_eq!(err.path().to_string(), "? [id 17]");
    }

    #[test]
    fn test_duplicate_rebid() {
        let root = system(vec![bid("1n")
            .with_child(bid("2c").with_child(RuleNode::new("and")))
            .with_child(bid("2C").with_child(RuleNode::new("and")))]);
        let err = build_system(&root).unwrap_err();
        assert_eq!(err.to_string(), "duplicate bid 1n > 2c");
    }

    #[test]
    fn test_bad_bounds_and_groups() {
        let unbounded = system(vec![bid("1c").with_child(
            RuleNode::new("and").with_child(RuleNode::new("points")),
        )]);
        assert!(matches!(
            build_system(&unbounded),
            Err(BuildError::Condition {
                source: ConditionError::UnconstrainedBounds(_),
                ..
            })
        ));
        let bad_group = system(vec![
            bid("1c").with_child(RuleNode::new("condition").with_attr("type", "maybe"))
        ]);
        assert!(matches!(
            build_system(&bad_group),
            Err(BuildError::Condition {
                source: ConditionError::InvalidGroupType(_),
                ..
            })
        ));
        let not_a_number = system(vec![bid("1c").with_child(
            RuleNode::new("and").with_child(RuleNode::new("hcp").with_attr("min", "lots")),
        )]);
        assert!(matches!(
            build_system(&not_a_number),
            Err(BuildError::Condition {
                source: ConditionError::InvalidNumber { .. },
                ..
            })
        ));

        let hcp_bound = |field: &str, text: &str| {
            let root = system(vec![bid("1c").with_child(
                RuleNode::new("and").with_child(RuleNode::new("hcp").with_attr(field, text)),
            )]);
            build_system(&root).map(|_| ()).map_err(|e| match e {
                BuildError::Condition { source, .. } => source,
                other => panic!("unexpected error {other}"),
            })
        };
        for (field, text) in [("min", "NaN"), ("min", "inf"), ("min", "-inf"), ("max", "NaN")] {
            assert!(
                matches!(hcp_bound(field, text), Err(ConditionError::InvalidBounds { .. })),
                "{field}={text}"
            );
        }
        assert!(matches!(
            hcp_bound("max", "inf"),
            Err(ConditionError::UnconstrainedBounds(_))
        ));
    }

    #[test]
    fn test_system_attributes() {
        let chimaera = RuleNode::new("system")
            .with_attr("hcp", "chimaera")
            .with_child(bid("1c").with_child(RuleNode::new("and").with_child(hcp(10, 10))));
        let tree = build_system(&chimaera).unwrap();
        // A=4.5 K=3 Q=1.5 J=0.75 T=0.25
        assert!(tree.opening("1c").unwrap().accept(&Hand::from_pbn("AJT2.Q432.K32.32")));

        let unknown = RuleNode::new("system").with_attr("hcp", "losers");
        assert!(matches!(
            build_system(&unknown),
            Err(BuildError::Condition {
                source: ConditionError::UnknownAttributeValue { .. },
                ..
            })
        ));
        let flat_points = |shape: &str| {
            let root = RuleNode::new("system").with_attr("shape", shape).with_child(
                bid("1c").with_child(
                    RuleNode::new("and")
                        .with_child(RuleNode::new("points").with_attr("min", 10)),
                ),
            );
            build_system(&root).unwrap()
        };
        // 4-3-3-3 ten count: 10 standard points, 9.5 by freakiness.
        let flat = Hand::from_pbn("AKQJ.432.432.432");
        assert!(flat_points("standard").opening("1c").unwrap().accept(&flat));
        assert!(!flat_points("freakiness").opening("1c").unwrap().accept(&flat));

        let unknown_shape = RuleNode::new("system").with_attr("shape", "losing");
        assert!(matches!(
            build_system(&unknown_shape),
            Err(BuildError::Condition {
                source: ConditionError::UnknownAttributeValue { .. },
                ..
            })
        ));
        assert!(build_system(&RuleNode::new("rules")).is_err());
        assert!(build_system(&RuleNode::new("system").with_child(RuleNode::new("hcp"))).is_err());
    }
}

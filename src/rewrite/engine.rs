use crate::config::ReplaceMode;
use crate::mapping::Rule;

use super::record::ChangeItem;

/// Result of applying the mapping table to one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    /// Whether `content` differs from the input.
    pub changed: bool,
    /// Number of matches processed.
    pub count: usize,
    pub items: Vec<ChangeItem>,
    pub content: String,
}

/// Applies `rules` to `content` in table order.
///
/// Each rule sees the content produced by the rules before it. Matches of one
/// rule are located against the content as it was when that rule started, and
/// each is then substituted according to `mode`. Empty matches are ignored.
pub fn rewrite(content: &str, rules: &[Rule], mode: ReplaceMode) -> Rewrite {
    let mut current = content.to_string();
    let mut items = Vec::new();

    for rule in rules {
        current = match mode {
            ReplaceMode::AllOccurrences => replace_occurrences(current, rule, &mut items),
            ReplaceMode::MatchedSpan => replace_spans(current, rule, &mut items),
        };
    }

    Rewrite { changed: current != content, count: items.len(), items, content: current }
}

fn replace_occurrences(content: String, rule: &Rule, items: &mut Vec<ChangeItem>) -> String {
    let matches: Vec<String> = rule
        .regex()
        .find_iter(&content)
        .filter(|m| !m.is_empty())
        .map(|m| m.as_str().to_string())
        .collect();

    let mut content = content;
    for matched in matches {
        content = content.replace(&matched, &rule.replacement);
        items.push(ChangeItem::new(&rule.name, &matched, &rule.replacement));
    }
    content
}

fn replace_spans(content: String, rule: &Rule, items: &mut Vec<ChangeItem>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for m in rule.regex().find_iter(&content) {
        if m.is_empty() {
            continue;
        }
        out.push_str(&content[last..m.start()]);
        out.push_str(&rule.replacement);
        last = m.end();
        items.push(ChangeItem::new(&rule.name, m.as_str(), &rule.replacement));
    }
    out.push_str(&content[last..]);
    out
}

/// Per-rule match counts against the unmodified `content`, for dry runs.
///
/// Only rules with at least one match are listed.
pub fn predict(content: &str, rules: &[Rule]) -> Vec<(String, usize)> {
    rules
        .iter()
        .filter_map(|rule| {
            let count = rule.regex().find_iter(content).filter(|m| !m.is_empty()).count();
            (count > 0).then(|| (rule.name.clone(), count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str, replacement: &str) -> Rule {
        Rule::new(name, pattern, replacement).unwrap()
    }

    fn bootstrap_rules() -> Vec<Rule> {
        vec![
            rule(
                "bootstrap_css",
                r#"https://cdn\.jsdelivr\.net/npm/bootstrap@[\d.]+/dist/css/bootstrap\.min\.css"#,
                "{% static 'css/bootstrap.min.css' %}",
            ),
            rule(
                "bootstrap_js",
                r#"https://cdn\.jsdelivr\.net/npm/bootstrap@[\d.]+/dist/js/bootstrap\.bundle\.min\.js"#,
                "{% static 'js/bootstrap.bundle.min.js' %}",
            ),
        ]
    }

    const PAGE: &str = r#"<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js"></script>"#;

    #[test]
    fn jquery_reference_is_localized() {
        let rules = vec![rule(
            "jquery",
            r#"["']?https://code.jquery.com/jquery-[\d.]+\.min\.js["']?"#,
            "LOCAL:js/jquery.min.js",
        )];
        let input = r#"<script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>"#;

        let result = rewrite(input, &rules, ReplaceMode::AllOccurrences);
        assert!(result.changed);
        assert_eq!(result.count, 1);
        assert_eq!(result.content, "<script src=LOCAL:js/jquery.min.js></script>");
        assert_eq!(result.items[0].rule_name, "jquery");
        assert_eq!(
            result.items[0].matched_text,
            r#""https://code.jquery.com/jquery-3.7.1.min.js""#
        );
    }

    #[test]
    fn trailing_quote_only_pattern_keeps_leading_quote() {
        let rules = vec![rule(
            "jquery",
            r#"https://code.jquery.com/jquery-[\d.]+\.min\.js["']?"#,
            "LOCAL:js/jquery.min.js",
        )];
        let input = r#"<script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>"#;
        let result = rewrite(input, &rules, ReplaceMode::AllOccurrences);
        assert_eq!(result.content, r#"<script src="LOCAL:js/jquery.min.js></script>"#);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let rules = vec![rule("jq", r"code\.jquery\.com/jquery\.js", "js/jquery.js")];
        let result = rewrite("CODE.JQUERY.COM/JQUERY.JS", &rules, ReplaceMode::AllOccurrences);
        assert_eq!(result.content, "js/jquery.js");
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let rules = bootstrap_rules();
        let first = rewrite(PAGE, &rules, ReplaceMode::AllOccurrences);
        assert!(first.changed);
        assert_eq!(first.count, 2);

        let second = rewrite(&first.content, &rules, ReplaceMode::AllOccurrences);
        assert!(!second.changed);
        assert_eq!(second.count, 0);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn content_without_matches_is_unchanged() {
        let input = "<p>No external assets here</p>";
        let result = rewrite(input, &bootstrap_rules(), ReplaceMode::AllOccurrences);
        assert!(!result.changed);
        assert_eq!(result.count, 0);
        assert!(result.items.is_empty());
        assert_eq!(result.content, input);
    }

    #[test]
    fn disjoint_rules_apply_regardless_of_order() {
        let rules = bootstrap_rules();
        let reversed: Vec<Rule> = rules.iter().rev().cloned().collect();

        let forward = rewrite(PAGE, &rules, ReplaceMode::AllOccurrences);
        let backward = rewrite(PAGE, &reversed, ReplaceMode::AllOccurrences);
        assert_eq!(forward.content, backward.content);
        assert!(forward.content.contains("{% static 'css/bootstrap.min.css' %}"));
        assert!(forward.content.contains("{% static 'js/bootstrap.bundle.min.js' %}"));
        assert!(!forward.content.contains("cdn.jsdelivr.net"));
    }

    #[test]
    fn later_rules_see_earlier_rewrites() {
        let rules = vec![
            rule("to_mid", "cdn/lib\\.js", "mid/lib.js"),
            rule("to_local", "mid/lib\\.js", "local/lib.js"),
        ];
        let result = rewrite("<script src=cdn/lib.js>", &rules, ReplaceMode::AllOccurrences);
        assert_eq!(result.content, "<script src=local/lib.js>");
        assert_eq!(result.count, 2);

        let reversed: Vec<Rule> = rules.into_iter().rev().collect();
        let result = rewrite("<script src=cdn/lib.js>", &reversed, ReplaceMode::AllOccurrences);
        assert_eq!(result.content, "<script src=mid/lib.js>");
    }

    #[test]
    fn repeated_literal_is_replaced_everywhere_once_matched() {
        let rules = vec![rule("lib", "src=\"(cdn/lib\\.js)\"", "src=\"local/lib.js\"")];
        let input = "<script src=\"cdn/lib.js\"></script><!-- src=\"cdn/lib.js\" -->";

        let all = rewrite(input, &rules, ReplaceMode::AllOccurrences);
        assert_eq!(
            all.content,
            "<script src=\"local/lib.js\"></script><!-- src=\"local/lib.js\" -->"
        );
        // Both matches are recorded even though the first replace already covered the second.
        assert_eq!(all.count, 2);

        let spans = rewrite(input, &rules, ReplaceMode::MatchedSpan);
        assert_eq!(spans.content, all.content);
        assert_eq!(spans.count, 2);
    }

    #[test]
    fn all_occurrences_reaches_text_the_pattern_does_not_match() {
        // The anchored pattern only matches the first line, but the same
        // literal inside the comment is rewritten as well.
        let rules = vec![rule("lib", r"(?m)^cdn/lib\.js$", "local/lib.js")];
        let input = "cdn/lib.js\n<!-- was cdn/lib.js -->";

        let all = rewrite(input, &rules, ReplaceMode::AllOccurrences);
        assert_eq!(all.content, "local/lib.js\n<!-- was local/lib.js -->");
        assert_eq!(all.count, 1);

        let spans = rewrite(input, &rules, ReplaceMode::MatchedSpan);
        assert_eq!(spans.content, "local/lib.js\n<!-- was cdn/lib.js -->");
        assert_eq!(spans.count, 1);
    }

    #[test]
    fn empty_matches_are_ignored() {
        let rules = vec![rule("greedy", "x*", "Y")];
        let result = rewrite("abc", &rules, ReplaceMode::AllOccurrences);
        assert!(!result.changed);
        assert_eq!(result.count, 0);
        let result = rewrite("abc", &rules, ReplaceMode::MatchedSpan);
        assert_eq!(result.content, "abc");
    }

    #[test]
    fn replacement_is_literal() {
        let rules = vec![rule("lib", r"(cdn)/lib\.js", "$1/local.js")];
        let result = rewrite("cdn/lib.js", &rules, ReplaceMode::MatchedSpan);
        assert_eq!(result.content, "$1/local.js");
        let result = rewrite("cdn/lib.js", &rules, ReplaceMode::AllOccurrences);
        assert_eq!(result.content, "$1/local.js");
    }

    #[test]
    fn predict_counts_per_rule_on_original_content() {
        let mut rules = bootstrap_rules();
        rules.push(rule("unused", "unpkg\\.com", "x"));
        let doubled = format!("{PAGE}\n{PAGE}");

        let predicted = predict(&doubled, &rules);
        assert_eq!(
            predicted,
            vec![("bootstrap_css".to_string(), 2), ("bootstrap_js".to_string(), 2)]
        );
    }
}

//! Text for the `legacyfix explain` and `legacyfix list-fixers` commands.
//!
//! Metadata comes from `legacyfix-fixer-catalog`; this module only lays it
//! out for a terminal.

use legacyfix_domain::Profile;
use legacyfix_fixer_catalog::{
    FixerMeta, fixer_keys, format_reliability, lookup_fixer, reliability_meaning,
};

const RULE: &str =
    "================================================================================";
const SUB_RULE: &str =
    "--------------------------------------------------------------------------------";

pub fn find(name: &str) -> anyhow::Result<&'static FixerMeta> {
    lookup_fixer(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown fixer: '{}'\n\nAvailable fixers: {}",
            name,
            fixer_keys().join(", ")
        )
    })
}

fn section(out: &mut String, title: &str, body: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(SUB_RULE);
    out.push('\n');
    out.push_str(body.trim_end());
    out.push_str("\n\n");
}

fn indented(code: &str) -> String {
    code.lines()
        .map(|l| format!("    {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_explanation(fixer: &FixerMeta) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("FIXER: {}\n", fixer.title));
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("Key:          {}\n", fixer.key));
    out.push_str(&format!(
        "Reliability:  {}\n\n",
        format_reliability(fixer.reliability)
    ));

    section(&mut out, "DESCRIPTION", fixer.description);
    section(
        &mut out,
        &format!("RELIABILITY: {}", format_reliability(fixer.reliability)),
        reliability_meaning(fixer.reliability),
    );
    section(&mut out, "RATIONALE", fixer.rationale);
    section(
        &mut out,
        "EXAMPLE",
        &format!(
            "Before:\n{}\n\nAfter:\n{}",
            indented(fixer.before),
            indented(fixer.after)
        ),
    );
    out
}

/// Catalog entries for the fixers of `profile`, in evaluation order.
///
/// Fixers registered without catalog metadata are left out.
pub fn profile_entries(profile: &Profile) -> Vec<&'static FixerMeta> {
    profile.fixer_names().filter_map(lookup_fixer).collect()
}

pub fn render_fixer_table(profile: &Profile) -> String {
    let mut out = format!("Fixers in profile '{}':\n\n", profile.name());
    out.push_str(&format!("  {:<18} {:<12} TITLE\n", "KEY", "RELIABILITY"));
    out.push_str(&format!("  {:<18} {:<12} -----\n", "---", "-----------"));
    for fixer in profile_entries(profile) {
        out.push_str(&format!(
            "  {:<18} {:<12} {}\n",
            fixer.key,
            format_reliability(fixer.reliability),
            fixer.title
        ));
    }
    out.push_str("\nUse 'legacyfix explain <key>' for details.\n");
    out
}

pub fn fixer_list_json(profile: &Profile) -> serde_json::Value {
    let fixers: Vec<_> = profile_entries(profile)
        .into_iter()
        .map(|f| {
            serde_json::json!({
                "key": f.key,
                "title": f.title,
                "reliability": format_reliability(f.reliability).to_lowercase(),
            })
        })
        .collect();
    serde_json::json!({
        "profile": profile.name(),
        "fixers": fixers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use legacyfix_domain::{FixerOptions, LEGACY_PRINT_FUNCTION};
    use pretty_assertions::assert_eq;

    #[test]
    fn find_accepts_dashes_and_case() {
        assert_eq!(find("Unicode-Literals").unwrap().key, "unicode_literals");
        let err = find("walrus").unwrap_err().to_string();
        assert!(err.contains("Unknown fixer: 'walrus'"));
        assert!(err.contains("division, encode"));
    }

    #[test]
    fn explanation_has_every_section() {
        let text = render_explanation(find("range").unwrap());
        for heading in [
            "FIXER: ",
            "Key:          range",
            "DESCRIPTION",
            "RELIABILITY: ",
            "RATIONALE",
            "EXAMPLE",
            "Before:\n    ",
            "After:\n    ",
        ] {
            assert!(text.contains(heading), "missing {heading:?}");
        }
    }

    #[test]
    fn table_follows_profile() {
        let legacy = render_fixer_table(&Profile::legacy());
        assert!(legacy.contains("  print "));
        let p = Profile::by_name(LEGACY_PRINT_FUNCTION, &FixerOptions::default()).unwrap();
        let text = render_fixer_table(&p);
        assert!(text.starts_with("Fixers in profile 'legacy-print-function':"));
        assert!(!text.contains("  print "));
        assert!(text.contains("  range "));
    }

    #[test]
    fn json_lists_keys_in_order() {
        let v = fixer_list_json(&Profile::legacy().retain(&[], &["u*".to_string()]));
        assert_eq!(v["profile"], "legacy");
        let keys: Vec<_> = v["fixers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["key"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            keys,
            vec![
                "division", "encode", "future", "getcwd", "imports", "newstyle", "print",
                "range", "super"
            ]
        );
        assert_eq!(v["fixers"][0]["reliability"], "exact");
    }
}

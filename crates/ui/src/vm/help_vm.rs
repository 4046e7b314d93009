use detective_core::gate::DENYLIST;
use detective_core::query::default_query_body;

/// Static content of the Help tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpVm {
    pub flavor: &'static str,
    pub default_query: String,
    pub denylist: Vec<&'static str>,
}

#[must_use]
pub fn help_content() -> HelpVm {
    HelpVm {
        flavor: "SQLite",
        default_query: default_query_body(),
        denylist: DENYLIST.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_blocked_term() {
        let help = help_content();
        assert_eq!(help.flavor, "SQLite");
        assert_eq!(help.denylist.len(), DENYLIST.len());
        assert!(help.denylist.contains(&"truncate"));
        assert!(help.default_query.starts_with("SELECT name AS available_tables"));
    }
}

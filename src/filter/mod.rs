/// Exclusion rules applied to every group address before aggregation.
///
/// Three independent checks: a dpt whitelist (only consulted when non-empty),
/// address prefixes to ignore, and dpt prefixes to ignore. Any single match
/// excludes the address.
#[derive(Debug, Clone, Default)]
pub struct AddressFilter {
    whitelist: Vec<String>,
    ignored_address_prefixes: Vec<String>,
    ignored_dpt_prefixes: Vec<String>,
}

impl AddressFilter {
    pub fn new(
        whitelist: Vec<String>,
        ignored_address_prefixes: Vec<String>,
        ignored_dpt_prefixes: Vec<String>,
    ) -> Self {
        Self {
            whitelist,
            ignored_address_prefixes,
            ignored_dpt_prefixes,
        }
    }

    /// True when the address must not end up in the generated config.
    /// The dpt is expected in canonical `"main.sub"` form.
    pub fn is_excluded(&self, address: &str, dpt: &str) -> bool {
        if !self.whitelist.is_empty() && !self.whitelist.iter().any(|w| w == dpt) {
            return true;
        }

        if self
            .ignored_address_prefixes
            .iter()
            .any(|prefix| address.starts_with(prefix.as_str()))
        {
            return true;
        }

        if self
            .ignored_dpt_prefixes
            .iter()
            .any(|prefix| dpt.starts_with(prefix.as_str()))
        {
            return true;
        }

        false
    }
}

use heck::AsLowerCamelCase;

/// Prefix for generated aliases: `c0`, `c1`, ...
pub const DEFAULT_ALIAS_PREFIX: &str = "c";

/// Derive the property name an accessor renders under: `personal_no` becomes
/// `personalNo`. Explicit per-field overrides take precedence over this.
pub fn property_name(accessor: &str) -> String {
    AsLowerCamelCase(accessor).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_lower_camel() {
        assert_eq!(property_name("personal_no"), "personalNo");
        assert_eq!(property_name("last_name"), "lastName");
        assert_eq!(property_name("info"), "info");
    }
}

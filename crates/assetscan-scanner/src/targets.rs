use assetscan_core::TargetSpec;

/// Split one comma-separated field into trimmed, non-empty entries.
fn split_entries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse the operator's address and segment fields into a target set.
///
/// Entries keep their input order and are neither validated nor expanded;
/// the service resolves CIDR blocks and ranges. An empty result is not an
/// error here, the request validation rejects it later.
#[must_use]
pub fn parse(raw_addresses: &str, raw_segments: &str) -> TargetSpec {
    TargetSpec {
        addresses: split_entries(raw_addresses),
        segments: split_entries(raw_segments),
    }
}

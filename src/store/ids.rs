use chrono::Utc;

/// Generate an id in the format "<prefix>-<epoch millis>-<6 hex chars>".
///
/// The random suffix keeps ids unique when several are created within the
/// same millisecond (one command can log many entries).
fn generate_id(prefix: &str) -> String {
    let bytes: [u8; 4] = rand::random();
    format!(
        "{}-{}-{:06x}",
        prefix,
        Utc::now().timestamp_millis(),
        u32::from_be_bytes(bytes) & 0x00FF_FFFF
    )
}

pub fn generate_change_id() -> String {
    generate_id("change")
}

pub fn generate_rental_id() -> String {
    generate_id("rental")
}

pub fn generate_scenario_id() -> String {
    generate_id("scenario")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let id = generate_change_id();
        let parts: Vec<_> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "change");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..200).map(|_| generate_rental_id()).collect();
        assert!(ids.len() > 190);
    }
}

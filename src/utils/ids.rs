//! Record identifier generation
//!
//! Identifiers are derived from the creation timestamp, the way the dashboard
//! has always minted them, with a short random suffix so that two records
//! created within the same millisecond never collide.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 5;

/// Identifier prefixes per record kind
pub mod prefix {
    pub const CONTACT: &str = "c";
    pub const TRACK: &str = "t";
    pub const PLAN: &str = "rp";
    pub const LINK: &str = "l";
    pub const TASK: &str = "tsk";

    pub const AI_CONTACT: &str = "ai-c";
    pub const AI_TRACK: &str = "ai-t";
    pub const AI_PLAN: &str = "ai-rp";
    pub const AI_LINK: &str = "ai-l";
}

/// Generate `<prefix>-<unix millis>-<base36 suffix>`
pub fn generate_id(prefix: &str) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        random_suffix(SUFFIX_LEN)
    )
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id(prefix::AI_CONTACT);
        assert!(id.starts_with("ai-c-"));

        let rest = id.trim_start_matches("ai-c-");
        let (millis, suffix) = rest.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_ids_in_same_millisecond_differ() {
        let ids: HashSet<String> = (0..200).map(|_| generate_id(prefix::TRACK)).collect();
        assert_eq!(ids.len(), 200);
    }
}

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

static PROCESS_RANDOM: OnceLock<u64> = OnceLock::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Record ids keep the document-store shape: 24 lowercase hex chars —
/// 8 of unix seconds, 10 of per-process randomness, 6 of a wrapping
/// counter. Ids generated by one process sort in creation order.
pub fn generate() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_secs() as u32;
    let process = PROCESS_RANDOM.get_or_init(|| rand::thread_rng().gen::<u64>() & 0xFF_FFFF_FFFF);
    let count = COUNTER.fetch_add(1, Ordering::SeqCst) & 0xFF_FFFF;
    format!("{secs:08x}{process:010x}{count:06x}")
}

pub fn is_valid(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

pub fn timestamp_of(id: &str) -> Option<u64> {
    if !is_valid(id) {
        return None;
    }
    u64::from_str_radix(&id[..8], 16).ok()
}

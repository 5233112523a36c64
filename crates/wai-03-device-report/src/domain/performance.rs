//! Render timing line.

use crate::domain::BULLET;

/// `Render ready in N ms[ • IP lookup in M ms]`.
pub fn performance_text(render_ms: u64, ip_lookup_ms: Option<u64>) -> String {
    let mut parts = vec![format!("Render ready in {} ms", render_ms)];
    if let Some(ip_ms) = ip_lookup_ms {
        parts.push(format!("IP lookup in {} ms", ip_ms));
    }
    parts.join(BULLET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_text() {
        assert_eq!(performance_text(12, None), "Render ready in 12 ms");
        assert_eq!(
            performance_text(12, Some(340)),
            "Render ready in 12 ms \u{2022} IP lookup in 340 ms"
        );
    }
}

//! Confetti burst shown once an RSVP has been sent.

use rand::Rng;

/// Colors drawn for confetti pieces
pub const PALETTE: [&str; 6] = [
    "#ec4899", "#f472b6", "#facc15", "#a78bfa", "#34d399", "#60a5fa",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub color: &'static str,
    /// Horizontal start position, percent of the viewport width
    pub left: f32,
    pub delay_ms: u32,
    pub duration_ms: u32,
    /// Final rotation in degrees
    pub rotation: i16,
    /// Edge length in pixels
    pub size: u8,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Confetti {
    pieces: Vec<ConfettiPiece>,
}

impl Confetti {
    pub fn burst(count: usize) -> Self {
        Self::burst_with(&mut rand::thread_rng(), count)
    }

    pub fn burst_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let pieces = (0..count)
            .map(|_| ConfettiPiece {
                color: PALETTE[rng.gen_range(0..PALETTE.len())],
                left: rng.gen_range(0.0..100.0),
                delay_ms: rng.gen_range(0..800),
                duration_ms: rng.gen_range(2200..4200),
                rotation: rng.gen_range(-540..=540),
                size: rng.gen_range(6..=12),
            })
            .collect();

        Confetti { pieces }
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_burst_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let confetti = Confetti::burst_with(&mut rng, 200);

        assert_eq!(confetti.pieces().len(), 200);
        for piece in confetti.pieces() {
            assert!(PALETTE.contains(&piece.color));
            assert!((0.0..100.0).contains(&piece.left));
            assert!(piece.delay_ms < 800);
            assert!((2200..4200).contains(&piece.duration_ms));
            assert!((-540..=540).contains(&piece.rotation));
            assert!((6..=12).contains(&piece.size));
        }
    }

    #[test]
    fn test_same_seed_same_burst() {
        let a = Confetti::burst_with(&mut StdRng::seed_from_u64(1), 10);
        let b = Confetti::burst_with(&mut StdRng::seed_from_u64(1), 10);
        assert_eq!(a, b);
    }
}

//! Deterministic visual sequences keyed by the reaction animation tag.

use std::time::Duration;

use shared::domain::{AnimationTag, Product};

/// Delay before the tumbler contents are replaced by the products.
pub const PRODUCT_SWAP_DELAY: Duration = Duration::from_millis(1200);

pub const PRECIPITATE_LABEL: &str = "Precipitate";

/// Two-stop vertical liquid gradient, top color first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub top: &'static str,
    pub bottom: &'static str,
}

impl Gradient {
    pub const DEFAULT: Gradient = Gradient::new("#aeeeee", "#4fc3f7");
    pub const NEUTRALIZATION: Gradient = Gradient::new("#b2f7b8", "#4fc3f7");
    pub const PRECIPITATE: Gradient = Gradient::new("#ffe082", "#b3c6e7");
    pub const SYNTHESIS: Gradient = Gradient::new("#b3e6ff", "#b3ffb3");
    pub const RUSTING: Gradient = Gradient::new("#b87333", "#b3c6e7");

    pub const fn new(top: &'static str, bottom: &'static str) -> Self {
        Self { top, bottom }
    }

    pub fn css(&self) -> String {
        format!(
            "linear-gradient(180deg, {} 0%, {} 100%)",
            self.top, self.bottom
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bubble {
    pub left_px: u32,
    pub start_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sparkle {
    pub left_px: u32,
    pub top_px: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPlan {
    pub tag: AnimationTag,
    pub liquid: Gradient,
    pub bubbles: Vec<Bubble>,
    pub sparkles: Vec<Sparkle>,
    pub precipitate: Option<&'static str>,
    pub swap_delay: Duration,
    pub products: Vec<Product>,
}

impl AnimationPlan {
    /// Number of transient effect elements (bubbles, sparkles, markers).
    pub fn effect_count(&self) -> usize {
        self.bubbles.len() + self.sparkles.len() + usize::from(self.precipitate.is_some())
    }
}

/// `count` sparkles starting at `(left, top)` and stepping by `(dx, dy)`.
fn sparkle_row(count: u32, left: u32, dx: u32, top: u32, dy: u32) -> Vec<Sparkle> {
    (0..count)
        .map(|i| Sparkle {
            left_px: left + i * dx,
            top_px: top + i * dy,
        })
        .collect()
}

pub fn plan(tag: &AnimationTag, products: &[Product]) -> AnimationPlan {
    let (liquid, bubbles, sparkles, precipitate) = match tag {
        AnimationTag::Neutralization => (
            Gradient::NEUTRALIZATION,
            (0..5u32)
                .map(|i| Bubble {
                    left_px: 40 + i * 22,
                    start_delay: Duration::from_millis(u64::from(i) * 300),
                })
                .collect(),
            sparkle_row(3, 30, 60, 30, 20),
            None,
        ),
        AnimationTag::Precipitate => (
            Gradient::PRECIPITATE,
            Vec::new(),
            sparkle_row(2, 60, 40, 40, 30),
            Some(PRECIPITATE_LABEL),
        ),
        AnimationTag::Synthesis => (
            Gradient::SYNTHESIS,
            Vec::new(),
            sparkle_row(4, 40, 30, 20, 30),
            None,
        ),
        AnimationTag::Rusting => (
            Gradient::RUSTING,
            Vec::new(),
            sparkle_row(2, 80, 30, 60, 20),
            None,
        ),
        AnimationTag::Other(_) => (Gradient::DEFAULT, Vec::new(), Vec::new(), None),
    };

    AnimationPlan {
        tag: tag.clone(),
        liquid,
        bubbles,
        sparkles,
        precipitate,
        swap_delay: PRODUCT_SWAP_DELAY,
        products: products.to_vec(),
    }
}

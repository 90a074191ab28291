//! Reaction orchestration: validation, request sequencing and result text.

use std::time::Duration;

use shared::{
    domain::{Product, RequestSeq},
    error::ServiceError,
    protocol::ReactionResult,
};

use crate::ui::animation::{self, AnimationPlan, PRODUCT_SWAP_DELAY};

pub const MIN_SELECTION: usize = 2;
pub const SELECTION_TOO_SMALL: &str =
    "Select at least two elements or compounds by dragging them into the tumbler.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReactionOutput {
    #[default]
    None,
    Pending,
    Summary {
        equation: String,
        description: String,
        products: Vec<Product>,
    },
    Error(String),
}

impl ReactionOutput {
    /// Text rendering of the result panel.
    pub fn render(&self) -> String {
        match self {
            ReactionOutput::None => String::new(),
            ReactionOutput::Pending => "Reacting...".to_string(),
            ReactionOutput::Summary {
                equation,
                description,
                products,
            } => {
                let products = products
                    .iter()
                    .map(|p| format!("{} ({})", p.name, p.formula))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Equation: {equation}\nDescription: {description}\nProducts: {products}")
            }
            ReactionOutput::Error(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Rejected,
    Issue {
        seq: RequestSeq,
        formulas: Vec<String>,
        cancel_swap: Option<RequestSeq>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleDecision {
    Stale,
    Animate(AnimationPlan),
    Failed,
}

#[derive(Debug, Clone)]
pub struct ReactionOrchestrator {
    last_issued: RequestSeq,
    /// Scheduled product swap and the products it will show.
    pending_swap: Option<(RequestSeq, Vec<Product>)>,
    swap_delay: Duration,
    pub output: ReactionOutput,
    pub animation: Option<AnimationPlan>,
}

impl Default for ReactionOrchestrator {
    fn default() -> Self {
        Self::with_swap_delay(PRODUCT_SWAP_DELAY)
    }
}

impl ReactionOrchestrator {
    pub fn with_swap_delay(swap_delay: Duration) -> Self {
        Self {
            last_issued: RequestSeq::default(),
            pending_swap: None,
            swap_delay,
            output: ReactionOutput::None,
            animation: None,
        }
    }

    /// Validates the selection snapshot and allocates a request.
    pub fn submit(&mut self, formulas: Vec<String>) -> SubmitDecision {
        if formulas.len() < MIN_SELECTION {
            self.output = ReactionOutput::Error(SELECTION_TOO_SMALL.to_string());
            self.animation = None;
            return SubmitDecision::Rejected;
        }
        self.last_issued = self.last_issued.next();
        self.output = ReactionOutput::Pending;
        SubmitDecision::Issue {
            seq: self.last_issued,
            formulas,
            cancel_swap: self.pending_swap.take().map(|(seq, _)| seq),
        }
    }

    pub fn settle(
        &mut self,
        seq: RequestSeq,
        outcome: Result<ReactionResult, ServiceError>,
    ) -> SettleDecision {
        if seq != self.last_issued {
            return SettleDecision::Stale;
        }
        match outcome {
            Ok(result) => {
                let mut plan = animation::plan(&result.animation_tag, &result.products);
                plan.swap_delay = self.swap_delay;
                self.output = ReactionOutput::Summary {
                    equation: result.equation,
                    description: result.description,
                    products: result.products,
                };
                self.animation = Some(plan.clone());
                self.pending_swap = Some((seq, plan.products.clone()));
                SettleDecision::Animate(plan)
            }
            Err(ServiceError::Rejected(message)) => {
                self.output = ReactionOutput::Error(message);
                self.animation = None;
                SettleDecision::Failed
            }
            Err(err) => {
                self.output = ReactionOutput::Error(format!("Reaction request failed: {err}"));
                self.animation = None;
                SettleDecision::Failed
            }
        }
    }

    /// Claims the pending product swap; `None` if `seq` is not the swap
    /// currently scheduled.
    pub fn take_swap(&mut self, seq: RequestSeq) -> Option<Vec<Product>> {
        match self.pending_swap.take() {
            Some((pending, products)) if pending == seq => Some(products),
            other => {
                self.pending_swap = other;
                None
            }
        }
    }

    pub fn pending_swap(&self) -> Option<RequestSeq> {
        self.pending_swap.as_ref().map(|(seq, _)| *seq)
    }

    pub fn last_issued(&self) -> RequestSeq {
        self.last_issued
    }

    pub fn swap_delay(&self) -> Duration {
        self.swap_delay
    }
}

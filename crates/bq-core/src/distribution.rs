//! Two-way integer distribution balancer.
//!
//! A known integer `total` is split between two mutually exclusive
//! categories (for example 1-channel and 16-channel remotes). The operator
//! edits either field in a confirmation dialog; every in-range edit
//! immediately rewrites the other field to `total - edited`. Confirming
//! validates independently of that live sync: both fields must parse as
//! non-negative integers summing exactly to `total`. Only a successful
//! confirm reaches the [`SplitSink`].
//!
//! ```text
//! Idle --open--> Open --edit--> Editing --confirm ok--> Confirmed
//!                 ^                |  \--cancel-------> Cancelled
//!                 +--confirm err---+
//! ```

use crate::notify::{Notification, Notifier};
use bq_common::parse_leading_int;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Message shown when either quantity is missing, non-numeric, or negative.
pub const NOT_POSITIVE_MESSAGE: &str = "Quantities must be positive numbers.";

/// A committed pair of quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub first: u32,
    pub second: u32,
}

impl Split {
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// Sum of both parts, without overflow.
    pub fn sum(&self) -> u64 {
        u64::from(self.first) + u64::from(self.second)
    }

    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::First => self.first,
            Field::Second => self.second,
        }
    }
}

/// One of the two dialog fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    First,
    Second,
}

impl Field {
    /// The counterpart field.
    pub fn other(self) -> Self {
        match self {
            Field::First => Field::Second,
            Field::Second => Field::First,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::First => write!(f, "first"),
            Field::Second => write!(f, "second"),
        }
    }
}

/// Dialog lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogState {
    #[default]
    Idle,
    Open,
    Editing,
    Confirmed,
    Cancelled,
}

impl DialogState {
    /// Whether the dialog has closed.
    pub fn is_terminal(self) -> bool {
        matches!(self, DialogState::Confirmed | DialogState::Cancelled)
    }

    /// Whether the dialog is showing and accepts edits.
    pub fn is_active(self) -> bool {
        matches!(self, DialogState::Open | DialogState::Editing)
    }
}

impl std::fmt::Display for DialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DialogState::Idle => "idle",
            DialogState::Open => "open",
            DialogState::Editing => "editing",
            DialogState::Confirmed => "confirmed",
            DialogState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Errors raised by the balancer.
///
/// The first three are confirm rejections: recoverable, the dialog stays
/// open and nothing is committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("Quantities must be positive numbers.")]
    NotNumeric { field: Field, raw: String },

    #[error("Quantities must be positive numbers.")]
    Negative { field: Field, value: i64 },

    #[error("Total must equal {expected}. Current total: {actual}.")]
    SumMismatch { expected: u32, actual: i64 },

    #[error("cannot {operation} while the dialog is {state}")]
    InvalidState {
        operation: &'static str,
        state: DialogState,
    },
}

impl DistributionError {
    /// Whether this is a validation rejection rather than a misuse of the
    /// state machine.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, DistributionError::InvalidState { .. })
    }
}

/// Receives a split once it has passed validation.
pub trait SplitSink {
    fn commit(&mut self, split: Split);
}

impl<F: FnMut(Split)> SplitSink for F {
    fn commit(&mut self, split: Split) {
        self(split)
    }
}

/// Validate raw field text against `total`.
pub fn validate_fields(first: &str, second: &str, total: u32) -> Result<Split, DistributionError> {
    let first_value = parse_field(Field::First, first)?;
    let second_value = parse_field(Field::Second, second)?;

    let sum = first_value.saturating_add(second_value);
    if sum != i64::from(total) {
        return Err(DistributionError::SumMismatch {
            expected: total,
            actual: sum,
        });
    }

    // Both are non-negative and sum to a u32, so each fits.
    Ok(Split {
        first: u32::try_from(first_value).unwrap_or(total),
        second: u32::try_from(second_value).unwrap_or(total),
    })
}

fn parse_field(field: Field, raw: &str) -> Result<i64, DistributionError> {
    let value = parse_leading_int(raw).ok_or_else(|| DistributionError::NotNumeric {
        field,
        raw: raw.to_string(),
    })?;
    if value < 0 {
        return Err(DistributionError::Negative { field, value });
    }
    Ok(value)
}

/// Generic balancer for one confirmation dialog.
#[derive(Debug, Clone)]
pub struct DistributionBalancer {
    total: u32,
    first: String,
    second: String,
    state: DialogState,
}

impl DistributionBalancer {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            first: String::new(),
            second: String::new(),
            state: DialogState::Idle,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Current raw text of a field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::First => &self.first,
            Field::Second => &self.second,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::First => &mut self.first,
            Field::Second => &mut self.second,
        }
    }

    fn require_active(&self, operation: &'static str) -> Result<(), DistributionError> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(DistributionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    /// Show the dialog with `initial` in the fields.
    pub fn open(&mut self, initial: Split) -> Result<(), DistributionError> {
        if self.state != DialogState::Idle {
            return Err(DistributionError::InvalidState {
                operation: "open",
                state: self.state,
            });
        }
        self.first = initial.first.to_string();
        self.second = initial.second.to_string();
        self.state = DialogState::Open;
        debug!(total = self.total, first = initial.first, second = initial.second, "Distribution dialog opened");
        Ok(())
    }

    /// Apply an edit to one field, syncing the other when the value is in
    /// `0..=total`.
    pub fn edit(&mut self, field: Field, raw: impl Into<String>) -> Result<(), DistributionError> {
        self.require_active("edit")?;
        let raw = raw.into();
        let parsed = parse_leading_int(&raw);
        *self.value_mut(field) = raw;
        self.state = DialogState::Editing;

        match parsed {
            Some(v) if v >= 0 && v <= i64::from(self.total) => {
                let counterpart = i64::from(self.total) - v;
                *self.value_mut(field.other()) = counterpart.to_string();
                debug!(field = %field, value = v, counterpart, "Synced distribution field");
            }
            _ => debug!(field = %field, "Edit out of range; counterpart unchanged"),
        }
        Ok(())
    }

    /// Validate the current fields without changing state.
    pub fn validate(&self) -> Result<Split, DistributionError> {
        validate_fields(&self.first, &self.second, self.total)
    }

    /// Validate and commit. On rejection the dialog returns to Open and the
    /// sink is not called.
    pub fn confirm(&mut self, sink: &mut impl SplitSink) -> Result<Split, DistributionError> {
        self.require_active("confirm")?;
        match self.validate() {
            Ok(split) => {
                sink.commit(split);
                self.state = DialogState::Confirmed;
                info!(total = self.total, first = split.first, second = split.second, "Distribution committed");
                Ok(split)
            }
            Err(err) => {
                self.state = DialogState::Open;
                debug!(error = %err, "Distribution rejected");
                Err(err)
            }
        }
    }

    /// Close without committing. Field validity does not matter.
    pub fn cancel(&mut self) -> Result<(), DistributionError> {
        self.require_active("cancel")?;
        self.state = DialogState::Cancelled;
        debug!("Distribution dialog cancelled");
        Ok(())
    }

    /// Describe the dialog for a modal presenter.
    pub fn modal_request(&self, layout: &DialogLayout) -> ModalRequest {
        ModalRequest {
            message: layout.message.clone(),
            fields: [
                ModalField {
                    field: Field::First,
                    label: layout.first_label.clone(),
                    value: self.first.clone(),
                },
                ModalField {
                    field: Field::Second,
                    label: layout.second_label.clone(),
                    value: self.second.clone(),
                },
            ],
            focus: layout.focus,
            close_on_overlay_click: false,
        }
    }
}

// ============================================================================
// Modal protocol
// ============================================================================

/// Static presentation of one balancer use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    pub message: String,
    pub first_label: String,
    pub second_label: String,
    /// Field that receives initial focus.
    pub focus: Field,
}

/// Labelled input in a modal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalField {
    pub field: Field,
    pub label: String,
    pub value: String,
}

/// What a modal presenter needs to show the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalRequest {
    pub message: String,
    pub fields: [ModalField; 2],
    pub focus: Field,
    /// Clicking outside the dialog never dismisses it.
    pub close_on_overlay_click: bool,
}

/// Shows a distribution dialog to the operator.
pub trait ModalPresenter {
    fn present(&mut self, request: &ModalRequest);
}

impl<F: FnMut(&ModalRequest)> ModalPresenter for F {
    fn present(&mut self, request: &ModalRequest) {
        self(request)
    }
}

/// How a dialog ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome<T> {
    Committed(T),
    Cancelled,
}

impl<T> ModalOutcome<T> {
    pub fn committed(self) -> Option<T> {
        match self {
            ModalOutcome::Committed(value) => Some(value),
            ModalOutcome::Cancelled => None,
        }
    }
}

/// Operator input replayed into a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Edit(Field, String),
    Confirm,
    Cancel,
}

/// Open `balancer` at `initial`, hand the resulting request to `presenter`,
/// and replay `events` until the dialog closes.
///
/// Rejections are reported through `notifier` as errors and the dialog
/// stays open for further events. Running out of events closes the dialog
/// as cancelled.
pub fn run_dialog<I>(
    balancer: &mut DistributionBalancer,
    initial: Split,
    layout: &DialogLayout,
    events: I,
    sink: &mut impl SplitSink,
    presenter: &mut impl ModalPresenter,
    notifier: &mut impl Notifier,
) -> Result<ModalOutcome<Split>, DistributionError>
where
    I: IntoIterator<Item = DialogEvent>,
{
    balancer.open(initial)?;
    presenter.present(&balancer.modal_request(layout));

    for event in events {
        match event {
            DialogEvent::Edit(field, raw) => balancer.edit(field, raw)?,
            DialogEvent::Confirm => match balancer.confirm(sink) {
                Ok(split) => return Ok(ModalOutcome::Committed(split)),
                Err(err) if err.is_rejection() => {
                    notifier.notify(Notification::error(err.to_string()));
                }
                Err(err) => return Err(err),
            },
            DialogEvent::Cancel => {
                balancer.cancel()?;
                return Ok(ModalOutcome::Cancelled);
            }
        }
    }

    balancer.cancel()?;
    Ok(ModalOutcome::Cancelled)
}

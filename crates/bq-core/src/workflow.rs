//! Operator workflows: printable quote request and the two distribution
//! dialogs.
//!
//! Workflows read a fresh [`QuoteSnapshot`] from the [`StateStore`] every
//! time they run and write back only through the store's setters.

use crate::distribution::{
    run_dialog, DialogEvent, DialogLayout, DistributionBalancer, DistributionError, Field,
    ModalOutcome, ModalPresenter, Split, SplitSink,
};
use crate::logging::generate_render_id;
use crate::notify::{Notification, Notifier};
use bq_common::{FormReader, OverrideFields, QuoteSnapshot};
use bq_report::source::{source_for, TemplateSource};
use bq_report::{QuoteConfig, QuoteGenerator, RenderedQuote};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span};

/// Notification published when a render fails for any reason.
pub const RENDER_FAILED_MESSAGE: &str = "Failed to generate quote preview. See console for details.";

/// Application state the workflows read and write.
pub trait StateStore {
    /// Current quote data and UI state.
    fn snapshot(&self) -> QuoteSnapshot;

    fn set_remote_distribution(&mut self, one_ch: u32, sixteen_ch: u32);

    fn set_dual_distribution(&mut self, combo: u32, slim: u32);
}

/// In-memory state store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: QuoteSnapshot,
}

impl MemoryStore {
    pub fn new(snapshot: QuoteSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn into_snapshot(self) -> QuoteSnapshot {
        self.snapshot
    }
}

impl StateStore for MemoryStore {
    fn snapshot(&self) -> QuoteSnapshot {
        self.snapshot.clone()
    }

    fn set_remote_distribution(&mut self, one_ch: u32, sixteen_ch: u32) {
        let distribution = &mut self.snapshot.ui.distribution;
        distribution.remote_1ch_qty = Some(one_ch);
        distribution.remote_16ch_qty = Some(sixteen_ch);
    }

    fn set_dual_distribution(&mut self, combo: u32, slim: u32) {
        let distribution = &mut self.snapshot.ui.distribution;
        distribution.dual_combo_qty = Some(combo);
        distribution.dual_slim_qty = Some(slim);
    }
}

/// Displays a finished quote document.
pub trait QuotePresenter {
    fn show(&mut self, html: &str);
}

impl<F: FnMut(&str)> QuotePresenter for F {
    fn show(&mut self, html: &str) {
        self(html)
    }
}

// ============================================================================
// Distribution use sites
// ============================================================================

/// Which quantity pair a distribution dialog balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Remotes split between 1-channel and 16-channel models.
    Remote,
    /// Dual-bracket pairs split between combo and slim brackets.
    Dual,
}

impl DistributionKind {
    /// Quantity to distribute.
    pub fn total(self, snapshot: &QuoteSnapshot) -> u32 {
        match self {
            DistributionKind::Remote => snapshot.ui.drive_remote_count.unwrap_or(0),
            DistributionKind::Dual => snapshot.dual_pair_count(),
        }
    }

    /// Split shown when the dialog opens: the prior commit where present.
    pub fn initial_split(self, snapshot: &QuoteSnapshot, total: u32) -> Split {
        let prior = &snapshot.ui.distribution;
        match self {
            DistributionKind::Remote => {
                let first = prior.remote_1ch_qty.unwrap_or(total);
                let second = prior
                    .remote_16ch_qty
                    .unwrap_or_else(|| total.saturating_sub(first));
                Split::new(first, second)
            }
            DistributionKind::Dual => Split::new(
                prior.dual_combo_qty.unwrap_or(total),
                prior.dual_slim_qty.unwrap_or(0),
            ),
        }
    }

    pub fn layout(self, total: u32) -> DialogLayout {
        match self {
            DistributionKind::Remote => DialogLayout {
                message: format!("Total remotes: {}. Please distribute them.", total),
                first_label: "1-Ch Qty:".to_string(),
                second_label: "16-Ch Qty:".to_string(),
                focus: Field::First,
            },
            DistributionKind::Dual => DialogLayout {
                message: format!("Total Dual pairs: {}. Please distribute them.", total),
                first_label: "Combo Qty:".to_string(),
                second_label: "Slim Qty:".to_string(),
                focus: Field::Second,
            },
        }
    }
}

impl std::fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionKind::Remote => write!(f, "remote"),
            DistributionKind::Dual => write!(f, "dual"),
        }
    }
}

/// Commits a remote split to the store.
pub struct RemoteSplitSink<'a, S: StateStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: StateStore + ?Sized> RemoteSplitSink<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }
}

impl<S: StateStore + ?Sized> SplitSink for RemoteSplitSink<'_, S> {
    fn commit(&mut self, split: Split) {
        self.store.set_remote_distribution(split.first, split.second);
    }
}

/// Commits a dual-bracket split to the store.
pub struct DualSplitSink<'a, S: StateStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: StateStore + ?Sized> DualSplitSink<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }
}

impl<S: StateStore + ?Sized> SplitSink for DualSplitSink<'_, S> {
    fn commit(&mut self, split: Split) {
        self.store.set_dual_distribution(split.first, split.second);
    }
}

/// Run a distribution dialog of `kind` against `store`.
///
/// The opened dialog is handed to `presenter` before any event is replayed.
pub fn handle_distribution<S, P, N, I>(
    kind: DistributionKind,
    store: &mut S,
    events: I,
    presenter: &mut P,
    notifier: &mut N,
) -> Result<ModalOutcome<Split>, DistributionError>
where
    S: StateStore + ?Sized,
    P: ModalPresenter,
    N: Notifier,
    I: IntoIterator<Item = DialogEvent>,
{
    let snapshot = store.snapshot();
    let total = kind.total(&snapshot);
    let initial = kind.initial_split(&snapshot, total);
    let layout = kind.layout(total);
    let mut balancer = DistributionBalancer::new(total);

    let _span = info_span!("distribution", kind = %kind, total).entered();
    debug!(
        first = initial.first,
        second = initial.second,
        "Opening distribution dialog"
    );

    match kind {
        DistributionKind::Remote => run_dialog(
            &mut balancer,
            initial,
            &layout,
            events,
            &mut RemoteSplitSink::new(store),
            presenter,
            notifier,
        ),
        DistributionKind::Dual => run_dialog(
            &mut balancer,
            initial,
            &layout,
            events,
            &mut DualSplitSink::new(store),
            presenter,
            notifier,
        ),
    }
}

pub fn handle_remote_distribution<S, P, N, I>(
    store: &mut S,
    events: I,
    presenter: &mut P,
    notifier: &mut N,
) -> Result<ModalOutcome<Split>, DistributionError>
where
    S: StateStore + ?Sized,
    P: ModalPresenter,
    N: Notifier,
    I: IntoIterator<Item = DialogEvent>,
{
    handle_distribution(DistributionKind::Remote, store, events, presenter, notifier)
}

pub fn handle_dual_distribution<S, P, N, I>(
    store: &mut S,
    events: I,
    presenter: &mut P,
    notifier: &mut N,
) -> Result<ModalOutcome<Split>, DistributionError>
where
    S: StateStore + ?Sized,
    P: ModalPresenter,
    N: Notifier,
    I: IntoIterator<Item = DialogEvent>,
{
    handle_distribution(DistributionKind::Dual, store, events, presenter, notifier)
}

// ============================================================================
// Printable quote
// ============================================================================

/// Renders printable quotes from two template sources.
pub struct QuoteWorkflow {
    generator: QuoteGenerator,
    quote_source: Box<dyn TemplateSource>,
    details_source: Box<dyn TemplateSource>,
}

impl QuoteWorkflow {
    pub fn new(
        generator: QuoteGenerator,
        quote_source: Box<dyn TemplateSource>,
        details_source: Box<dyn TemplateSource>,
    ) -> Self {
        Self {
            generator,
            quote_source,
            details_source,
        }
    }

    /// Workflow loading the template locations named in `config`.
    pub fn from_config(config: QuoteConfig) -> Self {
        let quote = source_for(&config.templates.quote);
        let details = source_for(&config.templates.details);
        Self::new(QuoteGenerator::new(config), quote, details)
    }

    pub fn generator(&self) -> &QuoteGenerator {
        &self.generator
    }

    /// Render the quote for the current state and hand it to `presenter`.
    ///
    /// On failure nothing is presented; the error is logged and one error
    /// notification is published before the error is returned.
    pub fn handle_printable_quote_request<S, P, N>(
        &self,
        store: &S,
        form: &dyn FormReader,
        presenter: &mut P,
        notifier: &mut N,
    ) -> bq_report::Result<RenderedQuote>
    where
        S: StateStore + ?Sized,
        P: QuotePresenter + ?Sized,
        N: Notifier + ?Sized,
    {
        let render_id = generate_render_id();
        let _span = info_span!("render", render_id = %render_id).entered();

        let snapshot = store.snapshot();
        let overrides = OverrideFields::from_form(form);

        match self.generator.generate_from_sources(
            self.quote_source.as_ref(),
            self.details_source.as_ref(),
            &snapshot,
            &overrides,
        ) {
            Ok(rendered) => {
                presenter.show(&rendered.html);
                info!(bytes = rendered.html.len(), "Quote preview presented");
                Ok(rendered)
            }
            Err(err) => {
                error!(error = %err, code = err.code(), "Error generating printable quote");
                notifier.notify(Notification::error(RENDER_FAILED_MESSAGE));
                Err(err)
            }
        }
    }
}

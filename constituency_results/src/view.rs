/*!
The two-state view: the list of constituencies (`Home`) and the results of
one constituency (`Detail`).

The controller never draws anything itself. It tells a [DisplaySurface] what
to show, which keeps it usable with an HTML page, a terminal or a test double.

Loading the records may be slow. A selection is therefore split in two steps:
[ViewController::begin_selection] hands out a token, and
[ViewController::complete_selection] applies the loaded records only if the
token is still the latest one. Results of older selections are dropped.
*/

use log::{error, info, warn};

use crate::cards::CandidateCard;
use crate::chart::ChartDescription;
use crate::config::{CandidateRecord, ResultsError, SchemaConfig};
use crate::source::RecordSource;
use crate::{run_pipeline, ConstituencyResults};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ViewState {
    Home,
    Detail { constituency: String },
}

/// Identifies one selection request.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct RequestToken(u64);

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SelectionOutcome {
    /// The results are on display.
    Applied,
    /// A newer selection was made in the meantime; nothing changed.
    Stale,
}

/// Whatever displays the results.
pub trait DisplaySurface {
    /// Removes the chart, the cards and any empty-state message.
    fn clear(&mut self);
    fn set_title(&mut self, title: Option<&str>);
    fn show_chart(&mut self, chart: &ChartDescription);
    fn show_cards(&mut self, cards: &[CandidateCard]);
    /// Number of candidates in the constituency, with and without the NOTA row.
    fn show_candidate_count(&mut self, _total: usize, _excluding_nota: usize) {}
    /// Tells the user that the constituency has no data.
    fn show_empty(&mut self, constituency: &str);
    fn set_panel(&mut self, state: &ViewState);
}

pub struct ViewController<D: DisplaySurface> {
    schema: SchemaConfig,
    surface: D,
    state: ViewState,
    next_token: u64,
    pending: Option<(RequestToken, String)>,
    last_results: Option<ConstituencyResults>,
}

impl<D: DisplaySurface> ViewController<D> {
    pub fn new(schema: SchemaConfig, mut surface: D) -> Self {
        surface.set_panel(&ViewState::Home);
        ViewController {
            schema,
            surface,
            state: ViewState::Home,
            next_token: 0,
            pending: None,
            last_results: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// The results currently on display, if any.
    pub fn last_results(&self) -> Option<&ConstituencyResults> {
        self.last_results.as_ref()
    }

    /// Registers a selection. Any earlier pending selection becomes stale.
    pub fn begin_selection(&mut self, constituency_name: &str) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        if let Some((old, name)) = &self.pending {
            info!(
                "Selection {:?} ({:?}) superseded by {:?} ({:?})",
                old, name, token, constituency_name
            );
        }
        self.pending = Some((token, constituency_name.trim().to_string()));
        token
    }

    /// Applies the records loaded for a selection.
    ///
    /// On `DataUnavailable` the display is left as it was. On
    /// `NoMatchingRecords` the detail panel shows an empty state. Both errors
    /// are returned to the caller after being handled.
    pub fn complete_selection(
        &mut self,
        token: RequestToken,
        loaded: Result<Vec<CandidateRecord>, ResultsError>,
    ) -> Result<SelectionOutcome, ResultsError> {
        let name = match &self.pending {
            Some((t, name)) if *t == token => name.clone(),
            _ => {
                warn!("Discarding results of stale selection {:?}", token);
                return Ok(SelectionOutcome::Stale);
            }
        };
        self.pending = None;

        let records = match loaded {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading or processing data: {}", e);
                return Err(e);
            }
        };

        match run_pipeline(&records, &name, &self.schema) {
            Ok(results) => {
                self.surface.clear();
                self.surface.set_title(Some(&results.title));
                self.surface.show_chart(&results.chart);
                self.surface.show_cards(&results.cards);
                self.surface.show_candidate_count(
                    results.total_candidates,
                    results.candidates_excluding_nota,
                );
                self.enter_detail(&name);
                self.last_results = Some(results);
                Ok(SelectionOutcome::Applied)
            }
            Err(e @ ResultsError::NoMatchingRecords { .. }) => {
                warn!("{}", e);
                self.surface.clear();
                self.surface.set_title(Some(&self.schema.title(&name)));
                self.surface.show_empty(&name);
                self.enter_detail(&name);
                self.last_results = None;
                Err(e)
            }
            Err(e) => {
                error!("Error loading or processing data: {}", e);
                Err(e)
            }
        }
    }

    /// Loads and shows a constituency in one go.
    pub fn select<S: RecordSource>(
        &mut self,
        constituency_name: &str,
        source: &S,
    ) -> Result<SelectionOutcome, ResultsError> {
        let token = self.begin_selection(constituency_name);
        let loaded = source.load(&self.schema.resource_id);
        self.complete_selection(token, loaded)
    }

    /// Returns to the list of constituencies.
    pub fn back(&mut self) {
        info!("Back to the constituency list");
        self.pending = None;
        self.last_results = None;
        self.surface.clear();
        self.surface.set_title(None);
        self.state = ViewState::Home;
        self.surface.set_panel(&self.state);
    }

    fn enter_detail(&mut self, name: &str) {
        self.state = ViewState::Detail {
            constituency: name.to_string(),
        };
        self.surface.set_panel(&self.state);
    }
}

//! Trip plan pipeline
//!
//! A plan is produced by four model calls made strictly in order, followed by
//! a local assembly step:
//!
//! 1. summary of the traveller's preferences
//! 2. two accommodation options
//! 3. five places to visit
//! 4. cost breakdown, fed with the full text of steps 2 and 3
//! 5. assembly of the sections into `full_plan`
//!
//! Each prompt is a pure function of the request and the text produced so far.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::extract::extract;
use crate::llm::LanguageModel;
use crate::models::{TravelPlan, TravelRequest};

/// The model-backed steps of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanStep {
    Summary,
    Hotels,
    Places,
    Cost,
}

impl PlanStep {
    pub const ALL: [PlanStep; 4] = [
        PlanStep::Summary,
        PlanStep::Hotels,
        PlanStep::Places,
        PlanStep::Cost,
    ];

    /// Name of the plan field the step fills
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            PlanStep::Summary => "travel_summary",
            PlanStep::Hotels => "hotel_options",
            PlanStep::Places => "places_to_visit",
            PlanStep::Cost => "cost_estimate",
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Text produced so far by one pipeline run
#[derive(Debug, Default)]
pub struct PipelineState {
    outputs: HashMap<PlanStep, String>,
}

impl PipelineState {
    fn record(&mut self, step: PlanStep, text: String) {
        self.outputs.insert(step, text);
    }

    /// Output of an earlier step, or "" if it has not run
    #[must_use]
    pub fn get(&self, step: PlanStep) -> &str {
        self.outputs.get(&step).map_or("", String::as_str)
    }

    fn take(&mut self, step: PlanStep) -> String {
        self.outputs.remove(&step).unwrap_or_default()
    }

    fn into_plan(mut self) -> TravelPlan {
        TravelPlan::from_sections(
            self.take(PlanStep::Summary),
            self.take(PlanStep::Hotels),
            self.take(PlanStep::Places),
            self.take(PlanStep::Cost),
        )
    }
}

/// Builds the prompt for each step
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    currency: String,
}

impl PromptBuilder {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    #[must_use]
    pub fn prompt(&self, step: PlanStep, request: &TravelRequest, state: &PipelineState) -> String {
        match step {
            PlanStep::Summary => self.summary(request),
            PlanStep::Hotels => self.hotels(request),
            PlanStep::Places => self.places(request),
            PlanStep::Cost => self.cost(
                request,
                state.get(PlanStep::Hotels),
                state.get(PlanStep::Places),
            ),
        }
    }

    #[must_use]
    pub fn summary(&self, request: &TravelRequest) -> String {
        format!(
            "You are a smart travel agent. Analyze the following user preferences:
- Destination: {destination} ({area})
- Duration: {days} days
- Budget: {currency}{budget} total
- Travel type: {travel_type}
- Interests: {interests}

Give a concise summary and note any constraints or considerations.",
            destination = request.destination,
            area = request.area_or_default(),
            days = request.duration_days,
            currency = self.currency,
            budget = request.budget,
            travel_type = request.travel_type,
            interests = request.interests_text(),
        )
    }

    #[must_use]
    pub fn hotels(&self, request: &TravelRequest) -> String {
        format!(
            "Recommend 2 {travel_type}-friendly accommodation options in or near {location}
for {days} days stay under {currency}{budget} total.

For each option include:
- Name
- Approximate price per night
- Total cost
- Why it's a good choice",
            travel_type = request.travel_type,
            location = request.stay_location(),
            days = request.duration_days,
            currency = self.currency,
            budget = request.budget,
        )
    }

    #[must_use]
    pub fn places(&self, request: &TravelRequest) -> String {
        format!(
            "Suggest 5 must-visit places in or near {destination} focusing on:
- Interests: {interests}
- Budget constraints (travel type: {travel_type})
- Located within 10-15 km of {center}

Include place name and reason to visit.",
            destination = request.destination,
            interests = request.interests_text(),
            travel_type = request.travel_type,
            center = request.sightseeing_center(),
        )
    }

    #[must_use]
    pub fn cost(&self, request: &TravelRequest, hotels: &str, places: &str) -> String {
        format!(
            "Estimate the total travel cost for this {days}-day trip to {destination} with the following:
- Hotel: {hotels}
- Sightseeing: {places}

Break down cost for:
- Hotel stay
- Transport/local travel
- Food
- Entry tickets (if any)
- Misc

Give total cost and whether it's within {currency}{budget}.",
            days = request.duration_days,
            destination = request.destination,
            currency = self.currency,
            budget = request.budget,
        )
    }
}

/// Turns travel requests into plans using a language model
pub struct TripPlanner {
    model: Option<Arc<dyn LanguageModel>>,
    prompts: PromptBuilder,
}

impl TripPlanner {
    /// `model` is `None` when no credential is configured; plans then
    /// carry setup guidance instead of generated content.
    pub fn new(model: Option<Arc<dyn LanguageModel>>, currency: impl Into<String>) -> Self {
        Self {
            model,
            prompts: PromptBuilder::new(currency),
        }
    }

    /// Whether a model is available
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Generate a plan for `request`.
    ///
    /// Invalid requests are rejected before any model call. A model failure
    /// at any step aborts the whole plan.
    #[instrument(skip(self, request), fields(destination = %request.destination, days = request.duration_days))]
    pub async fn plan(&self, request: &TravelRequest) -> crate::Result<TravelPlan> {
        request.validate()?;

        let Some(model) = &self.model else {
            info!("No model configured, returning setup guidance");
            return Ok(TravelPlan::missing_credential());
        };

        let started = Instant::now();
        let mut state = PipelineState::default();
        for step in PlanStep::ALL {
            let prompt = self.prompts.prompt(step, request, &state);
            debug!(%step, prompt_len = prompt.len(), "Invoking model");

            let step_started = Instant::now();
            let response = model.invoke(&prompt).await?;
            let text = extract(&response);
            debug!(
                %step,
                output_len = text.len(),
                "Step finished in {:.3}s",
                step_started.elapsed().as_secs_f64()
            );
            state.record(step, text);
        }

        info!(
            "Generated travel plan in {:.3}s",
            started.elapsed().as_secs_f64()
        );
        Ok(state.into_plan())
    }
}

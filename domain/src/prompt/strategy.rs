//! Prompt-building strategies, one per objective type.
//!
//! Every strategy renders the same skeleton:
//!
//! ```text
//! [As a {persona},] {question} {instruction} [Please respond in {LANG}.] {format}
//! ```
//!
//! Only the instruction and format clauses differ between strategies.

use crate::event::persona::Persona;
use crate::event::question::DEFAULT_LANGUAGE;

/// Inputs to a prompt render.
#[derive(Debug, Clone, Copy)]
pub struct PromptRequest<'a> {
    pub question: &'a str,
    pub target_product: Option<&'a str>,
    pub target_category: Option<&'a str>,
    pub persona: Option<&'a Persona>,
    pub language: &'a str,
}

impl<'a> PromptRequest<'a> {
    pub fn new(question: &'a str) -> Self {
        Self {
            question,
            target_product: None,
            target_category: None,
            persona: None,
            language: DEFAULT_LANGUAGE,
        }
    }

    pub fn with_target_product(mut self, product: Option<&'a str>) -> Self {
        self.target_product = product;
        self
    }

    pub fn with_target_category(mut self, category: Option<&'a str>) -> Self {
        self.target_category = category;
        self
    }

    pub fn with_persona(mut self, persona: &'a Persona) -> Self {
        self.persona = Some(persona);
        self
    }

    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }

    fn needs_translation(&self) -> bool {
        let language = self.language.trim();
        !language.is_empty() && !language.eq_ignore_ascii_case(DEFAULT_LANGUAGE)
    }
}

/// Closed set of prompt strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptStrategy {
    /// Ranked top-5 list
    TopRecommendation,
    /// Competitive landscape analysis
    CompetitorAnalysis,
    /// Pros and cons breakdown
    ProsCons,
}

impl PromptStrategy {
    pub const ALL: [PromptStrategy; 3] = [
        PromptStrategy::TopRecommendation,
        PromptStrategy::CompetitorAnalysis,
        PromptStrategy::ProsCons,
    ];

    /// Objective-type tag this strategy is registered under.
    pub fn objective_type(&self) -> &'static str {
        match self {
            PromptStrategy::TopRecommendation => "top_5_recommendation",
            PromptStrategy::CompetitorAnalysis => "main_competitors",
            PromptStrategy::ProsCons => "pros_and_cons",
        }
    }

    pub fn render(&self, request: &PromptRequest<'_>) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(5);

        if let Some(persona) = request.persona.and_then(Persona::render) {
            parts.push(format!("As a {},", persona));
        }

        parts.push(request.question.trim().to_string());
        parts.push(self.instruction(request));

        if request.needs_translation() {
            parts.push(format!("Please respond in {}.", request.language.trim()));
        }

        parts.push(self.format_instruction().to_string());

        parts.join(" ")
    }

    fn instruction(&self, request: &PromptRequest<'_>) -> String {
        let product = request.target_product;
        let category = request.target_category;

        match self {
            PromptStrategy::TopRecommendation => match category {
                Some(category) => format!("Give me a list of top 5 {}.", category),
                None => "Give me a list of top 5 recommendations.".to_string(),
            },
            PromptStrategy::CompetitorAnalysis => match (product, category) {
                (Some(product), Some(category)) => format!(
                    "Who are the main competitors of {} in the {} space?",
                    product, category
                ),
                (None, Some(category)) => {
                    format!("Who are the main players in the {} market?", category)
                }
                (Some(product), None) => format!("Who are the main competitors of {}?", product),
                (None, None) => "Who are the main competitors in this space?".to_string(),
            },
            PromptStrategy::ProsCons => match (product, category) {
                (Some(product), _) => {
                    format!("What are the pros and cons of using {}?", product)
                }
                (None, Some(category)) => format!(
                    "What are the pros and cons of the leading {} options?",
                    category
                ),
                (None, None) => "What are the main pros and cons?".to_string(),
            },
        }
    }

    fn format_instruction(&self) -> &'static str {
        match self {
            PromptStrategy::TopRecommendation => {
                "Format your response as a clear ranked list (1-5) with brief explanations."
            }
            PromptStrategy::CompetitorAnalysis => {
                "Provide a comprehensive analysis including market position, strengths, and competitive advantages of each competitor."
            }
            PromptStrategy::ProsCons => {
                "Please structure your response with clear 'Pros:' and 'Cons:' sections, providing specific, actionable insights for each point."
            }
        }
    }
}

impl std::fmt::Display for PromptStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.objective_type())
    }
}

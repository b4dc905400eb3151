//! Scenario runner.

use trellis_session::{Engine, Request};

use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::Operations;
use crate::scenario::Scenario;

/// Runs a scenario against a fresh engine.
pub struct Runner<'s> {
    scenario: &'s Scenario,
    operations: Operations,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> ScenarioResult<Self> {
        let operations = scenario.load_operations()?;
        Ok(Self {
            scenario,
            operations,
        })
    }

    /// Run the scenario.
    pub fn run(&self) -> ScenarioResult<()> {
        let engine = Engine::with_seed(
            self.scenario.engine_config().clone(),
            self.scenario.seed_source(),
        )
        .map_err(|e| ScenarioError::EngineSetup(e.to_string()))?;

        for step in self.scenario.steps() {
            let document = self
                .operations
                .get_step(&step.name)
                .ok_or_else(|| ScenarioError::step_not_found(&step.name))?;
            let request = Request::from_json(document)
                .map_err(|e| ScenarioError::step_request(&step.name, e.to_string()))?;

            let result = engine.call(&request).map_err(|e| e.to_string());
            step.assertion.verify(&step.name, &result)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::scenario::Scenario;
    use trellis_core::attrs;

    const OPS: &str = r#"
--# all_tweets
{"field": "allTweets", "selection": ["id", "text"]}

--# missing
{"field": "ghost"}
"#;

    #[test]
    fn test_runner_with_inline_operations() {
        Scenario::new("inline")
            .operations_source(OPS)
            .unwrap()
            .step("all_tweets", |a| a.rows(4).first(attrs! { "id" => "1", "text" => "hello 1" }))
            .step("missing", |a| a.error("unknown field"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_unknown_step_fails() {
        let result = Scenario::new("inline")
            .operations_source(OPS)
            .unwrap()
            .step("not_in_file", |a| a)
            .run();
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_assertion_reported() {
        let result = Scenario::new("inline")
            .operations_source(OPS)
            .unwrap()
            .step("all_tweets", |a| a.rows(99))
            .run();
        assert!(matches!(
            result,
            Err(crate::ScenarioError::AssertionFailed { .. })
        ));
    }
}

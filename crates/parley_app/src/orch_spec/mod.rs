mod orch_runner;
mod orch_scenarios;
mod orch_setup;

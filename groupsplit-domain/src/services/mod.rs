pub mod balance_accumulator;
pub mod settlement_calculator;
pub mod settlement_engine;

pub use balance_accumulator::BalanceAccumulator;
pub use settlement_calculator::SettlementCalculator;
pub use settlement_engine::SettlementEngine;

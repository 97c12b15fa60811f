mod ledger;
mod market;
mod request;
mod results;

pub use ledger::{DividendEntry, DividendOutcome, SimulationWarning, WarningKind};
pub use market::{DividendEvent, FundMetadata, MISSING_FIELD, PricePoint};
pub use request::{
    ComparisonRequest, DividendPolicy, PositionSize, SimulationRequest, UnmatchedDividendPolicy,
};
pub use results::{
    ComparisonOutcome, ComparisonSeries, DailyRecord, IncomeDelta, ReturnPoint, SimulationResult,
    SummaryMetrics,
};

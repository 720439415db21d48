/// Name of a categorical axis declared in configuration.
/// Examples: `tier`, `industry`
pub type DimensionName = String;
/// Dimension value after normalization, compared for exact membership
/// against a dimension's declared values.
/// Examples: `strategic`, `medical_devices`
pub type CanonicalValue = String;
/// Entity-type label bound to one or more source locations.
/// Examples: `customer`, `prospect`
pub type EntityType = String;
/// Store-relative location of a record source (directory or log file).
/// Examples: `customers/strategic`, `customers/prospects/_registry.jsonl`
pub type StorePath = String;

/// Runtime data types and declared types.
///
/// Defines `DataType`, the tag every runtime value carries, and
/// `DeclaredType`, the annotation written in declarations and parameter
/// lists (`number`, `any`, `[]string`). Declared types decide which values a
/// binding or parameter accepts.
pub mod data_type;

pub mod core;

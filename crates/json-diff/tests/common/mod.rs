pub mod assertions;
pub mod documents;

pub mod feature;
pub mod outcome;
pub mod stop;
pub mod track;
pub mod weather;

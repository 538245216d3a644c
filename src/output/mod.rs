// Human- and machine-readable reporting for prepared corpora.

pub mod terminal;

pub use terminal::CorpusReport;

pub mod warnings;

pub mod payload_parser;

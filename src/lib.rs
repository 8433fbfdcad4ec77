//! gs-lesson-deck: LLM-drafted Global Success English lessons exported as slide decks.
//! Hexagonal layout: domain, ports, use cases, adapters.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

/*! # `travelupa`

A library crate for the Travelupa travel catalog app on Android.

## Purpose

This is the backend of Travelupa. It keeps the catalog of Indonesian tourist destinations, and lets you narrow it down with filters.

Internally, the catalog lives in a small SQLite database. Screens subscribe to live feeds from it, then filter what they get in memory.

## Status

Under active development.

- [x] Taxonomies (categories, place types, provinces)
- [x] Filters
    - [x] Building conditions from the filter dialog
    - [x] Applying them to a candidate list
    - [x] Turning them into SQL
- [x] Catalog storage
    - [x] Live feeds (all, favorites)
    - [x] Lookups (by id, name prefix, category)
    - [x] Add, update, delete, favorite
- [x] Seeding a fresh catalog
- [ ] Image uploads
    - The app uploads pictures itself, then hands us the URL.
*/

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod seed;

use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::LandingError;
use crate::ports::KeyValueStore;

pub const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub source: String,
}

impl Lead {
    pub fn new(name: &str, phone: &str, at: DateTime<Local>, source: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            date: at.format(DATE_FORMAT).to_string(),
            source: source.to_string(),
        }
    }
}

/// Leads kept under a single key as one JSON array.
///
/// Appending reads the whole list, pushes, and writes it all back. Nothing
/// else runs between the read and the write on a single-threaded page, so no
/// locking is done.
pub struct LeadStore<'a, S: KeyValueStore + ?Sized> {
    storage: &'a S,
    key: &'a str,
}

impl<'a, S: KeyValueStore + ?Sized> LeadStore<'a, S> {
    pub fn new(storage: &'a S, key: &'a str) -> Self {
        Self { storage, key }
    }

    pub fn load(&self) -> Result<Vec<Lead>, LandingError> {
        match self.storage.get_item(self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn append(&self, lead: Lead) -> Result<usize, LandingError> {
        let mut leads = self.load()?;
        leads.push(lead);
        self.storage.set_item(self.key, &serde_json::to_string(&leads)?)?;
        if let Some(lead) = leads.last() {
            info!("Lead saved: {} ({}) via {}", lead.name, lead.phone, lead.source);
        }
        Ok(leads.len())
    }
}

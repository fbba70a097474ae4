//! Aerofoil library: folder scan, conflict detection, two-phase resolution
//!
//! Loading enumerates every file under a folder recursively and parses each
//! into an [`AerofoilProfile`]. Two files normalizing to the same display
//! name are never silently deduplicated: the second becomes the challenger
//! of a [`FoilConflict`] that the caller must settle with
//! [`AerofoilLibrary::resolve`] before the library can feed a transform.
//!
//! A reload is just another [`AerofoilLibrary::load`] call: the result is
//! recomputed from disk wholesale, so no stale entries survive into the new
//! library value.

use crate::error::{Error, Result};
use crate::profile::AerofoilProfile;
use std::path::Path;
use walkdir::WalkDir;

/// Two profile files claiming the same display name
///
/// The incumbent is the file encountered first (and currently in the
/// resolved list); the challenger is the later file. Which one wins is the
/// caller's decision, typically after showing both to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FoilConflict {
    /// Profile currently holding the name
    pub incumbent: AerofoilProfile,
    /// Later profile claiming the same name
    pub challenger: AerofoilProfile,
}

/// Caller-supplied verdict for one [`FoilConflict`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Keep the profile that was encountered first
    Incumbent,
    /// Replace it with the later file's profile
    Challenger,
}

/// A resolved set of aerofoil profiles plus any pending name conflicts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AerofoilLibrary {
    profiles: Vec<AerofoilProfile>,
    conflicts: Vec<FoilConflict>,
}

impl AerofoilLibrary {
    /// Scan a folder recursively and load every profile file in it
    ///
    /// Files are visited in name order for a deterministic incumbent choice.
    /// Calling this again is a reload: the library is rebuilt from disk and
    /// replaces the previous value wholesale.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the folder cannot be walked or a file cannot be
    /// read; [`Error::MalformedProfile`] when a file matches neither storage
    /// convention.
    pub fn load(folder: impl AsRef<Path>) -> Result<Self> {
        let mut library = AerofoilLibrary::default();
        for entry in WalkDir::new(folder).sort_by_file_name() {
            let entry = entry.map_err(|err| Error::Io(err.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let profile = AerofoilProfile::from_path(entry.path())?;
            library.insert(profile);
        }
        Ok(library)
    }

    /// Build a library from already-parsed profiles
    ///
    /// Applies the same duplicate-name detection as [`AerofoilLibrary::load`].
    pub fn from_profiles(profiles: impl IntoIterator<Item = AerofoilProfile>) -> Self {
        let mut library = AerofoilLibrary::default();
        for profile in profiles {
            library.insert(profile);
        }
        library
    }

    fn insert(&mut self, profile: AerofoilProfile) {
        match self.profiles.iter().find(|p| p.name == profile.name) {
            Some(incumbent) => self.conflicts.push(FoilConflict {
                incumbent: incumbent.clone(),
                challenger: profile,
            }),
            None => self.profiles.push(profile),
        }
    }

    /// The resolved profiles, in scan order
    pub fn profiles(&self) -> &[AerofoilProfile] {
        &self.profiles
    }

    /// Pending name conflicts awaiting a caller decision
    pub fn conflicts(&self) -> &[FoilConflict] {
        &self.conflicts
    }

    /// Whether any name conflict is still unresolved
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Look up a resolved profile by display name (trimmed)
    pub fn profile(&self, name: &str) -> Option<&AerofoilProfile> {
        let name = name.trim();
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Apply caller decisions to the pending conflicts, in order
    ///
    /// One choice per conflict, in the order [`AerofoilLibrary::conflicts`]
    /// reports them. Choosing the challenger swaps it into the resolved
    /// list under the contested name. An empty library resolves trivially
    /// with an empty slice.
    ///
    /// # Errors
    ///
    /// [`Error::ConflictResolution`] when the number of choices does not
    /// match the number of pending conflicts.
    pub fn resolve(&mut self, choices: &[ConflictChoice]) -> Result<()> {
        if choices.len() != self.conflicts.len() {
            return Err(Error::ConflictResolution(format!(
                "{} conflicts pending but {} choices supplied",
                self.conflicts.len(),
                choices.len()
            )));
        }
        let conflicts = std::mem::take(&mut self.conflicts);
        for (conflict, choice) in conflicts.into_iter().zip(choices) {
            if let ConflictChoice::Challenger = choice {
                let name = conflict.challenger.name.clone();
                if let Some(slot) = self.profiles.iter_mut().find(|p| p.name == name) {
                    *slot = conflict.challenger;
                }
            }
        }
        Ok(())
    }
}

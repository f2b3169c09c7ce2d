// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::BaseImageStorage;
use crate::common::MemberNo;

// =============================================================================
// Mock Image Storage
// =============================================================================

/// A stored image captured by `MockImageStorage`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub filename: String,
    pub size: usize,
}

pub struct MockImageStorage {
    stored: Arc<Mutex<Vec<StoredImage>>>,
    fail: bool,
}

impl MockImageStorage {
    pub fn new() -> Self {
        Self {
            stored: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Storage that rejects every write
    pub fn failing() -> Self {
        Self {
            stored: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// All images stored so far
    pub fn stored(&self) -> Vec<StoredImage> {
        self.stored.lock().unwrap().clone()
    }
}

impl Default for MockImageStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseImageStorage for MockImageStorage {
    async fn store_member_image(
        &self,
        member_no: &MemberNo,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        if self.fail {
            return Err(anyhow!("mock storage unavailable"));
        }

        let filename = format!("{}.{}", member_no, extension);
        self.stored.lock().unwrap().push(StoredImage {
            filename: filename.clone(),
            size: bytes.len(),
        });
        Ok(filename)
    }
}

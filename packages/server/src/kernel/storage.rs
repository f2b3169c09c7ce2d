//! Local filesystem storage for member images.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::common::MemberNo;
use crate::kernel::BaseImageStorage;

pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BaseImageStorage for LocalImageStorage {
    async fn store_member_image(
        &self,
        member_no: &MemberNo,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let filename = format!("{}.{}", member_no, extension);

        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create upload directory {:?}", self.root))?;

        let path = self.root.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write member image {:?}", path))?;

        info!(member_no = %member_no, path = ?path, "Stored member image");

        Ok(filename)
    }
}

use crate::manifest::Manifest;

#[derive(Debug, Clone)]
pub struct SyncParams {
    pub local_root: String,
    pub manifest: Manifest,
    pub remote_base_url: String,
}

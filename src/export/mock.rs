use super::{Clipboard, SharePayload, ShareTarget};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockClipboard {
    contents: Arc<Mutex<Option<String>>>,
    should_fail: bool,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(mut self, should_fail: bool) -> Self {
        self.should_fail = should_fail;
        self
    }

    pub fn get_contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for MockClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        if self.should_fail {
            return Err(Error::Clipboard("mock clipboard unavailable".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockShareTarget {
    shared: Arc<Mutex<Vec<SharePayload>>>,
    should_fail: bool,
}

impl MockShareTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(mut self, should_fail: bool) -> Self {
        self.should_fail = should_fail;
        self
    }

    pub fn get_shared(&self) -> Vec<SharePayload> {
        self.shared.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShareTarget for MockShareTarget {
    async fn share(&self, payload: &SharePayload) -> Result<()> {
        if self.should_fail {
            return Err(Error::Share("share sheet dismissed".to_string()));
        }
        self.shared.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

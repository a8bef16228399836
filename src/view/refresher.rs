use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context;

use crate::config::Presentation;
use crate::foundation::error::BoardResult;
use crate::pipeline::cancel::CancelToken;
use crate::view::refresh::template_refresh;
use crate::view::{TemplateSlot, View};

/// Background thread that periodically updates a view and recompiles its tree.
#[derive(Debug)]
pub(crate) struct Refresher {
    cancel: CancelToken,
    join: Option<JoinHandle<()>>,
}

impl Refresher {
    pub(crate) fn spawn(
        view: Arc<dyn View>,
        slot: Arc<TemplateSlot>,
        presentation: Arc<Presentation>,
        every: Duration,
    ) -> BoardResult<Self> {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let join = std::thread::Builder::new()
            .name("ledboard-refresh".into())
            .spawn(move || {
                while !token.sleep(every) {
                    let res = view
                        .update()
                        .and_then(|()| template_refresh(view.as_ref(), &slot, &presentation));
                    if let Err(e) = res {
                        tracing::warn!(
                            view = view.kind(),
                            error = %e,
                            "refresh failed; keeping previous tree"
                        );
                    }
                }
            })
            .context("spawn refresher thread")?;
        Ok(Self {
            cancel,
            join: Some(join),
        })
    }

    pub(crate) fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(j) = self.join.take()
            && j.join().is_err()
        {
            tracing::warn!("refresher thread panicked");
        }
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.stop();
    }
}

// src/clipboard.rs
#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
use arboard::Clipboard as ArboardClipboard;
#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
use zeroize::Zeroizing;

/// Best-effort text clipboard
pub trait Clipboard {
    fn copy(&self, text: &str);
}

/// Platform clipboard. Desktop only; other targets log and do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = text;
            log::info!("Clipboard copy not supported on web platform.");
        }

        #[cfg(target_os = "android")]
        {
            let _ = text;
            log::info!("Clipboard copy not supported on Android platform.");
        }

        #[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
        {
            let text = owned_payload(text);
            // arboard can block on some X11 setups; keep it off the UI thread
            std::thread::spawn(move || match ArboardClipboard::new() {
                Ok(mut clipboard) => {
                    if let Err(e) = clipboard.set_text(text.as_str()) {
                        log::warn!("Clipboard copy failed: {}", e);
                    }
                }
                Err(e) => log::warn!("Clipboard unavailable: {}", e),
            });
        }
    }
}

/// Copy handed to the clipboard thread; may be a secret seed, so it is wiped on drop
#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
fn owned_payload(text: &str) -> Zeroizing<String> {
    Zeroizing::new(text.to_owned())
}

#[cfg(test)]
pub mod testing {
    use super::Clipboard;
    use std::cell::RefCell;

    /// Remembers everything copied
    #[derive(Default)]
    pub struct RecordingClipboard {
        pub copied: RefCell<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&self, text: &str) {
            self.copied.borrow_mut().push(text.to_string());
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32"), not(target_os = "android")))]
mod tests {
    use super::*;

    #[test]
    fn test_thread_payload_is_zeroizing() {
        let payload: Zeroizing<String> = owned_payload("SSECRETSEED");
        assert_eq!(payload.as_str(), "SSECRETSEED");
    }
}

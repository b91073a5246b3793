//! 進捗通知
//!
//! 呼び出し側のコールバック `(percent, message)` をエンジン内から同期的に呼ぶ。
//! 通知値は 0..=100 に丸め、既に通知した値より小さくならない。

/// 進捗通知チャネル
pub struct Progress<'a> {
    callback: Option<&'a mut dyn FnMut(u8, &str)>,
    last: u8,
}

impl<'a> Progress<'a> {
    pub fn new(callback: &'a mut dyn FnMut(u8, &str)) -> Self {
        Self {
            callback: Some(callback),
            last: 0,
        }
    }

    /// 通知先なし
    pub fn silent() -> Self {
        Self {
            callback: None,
            last: 0,
        }
    }

    pub fn report(&mut self, percent: u8, message: impl AsRef<str>) {
        let percent = percent.min(100).max(self.last);
        self.last = percent;
        if let Some(callback) = self.callback.as_mut() {
            callback(percent, message.as_ref());
        }
    }

    /// `start..=end` の区間で `done / total` の位置を通知
    pub fn report_fraction(&mut self, start: u8, end: u8, done: usize, total: usize, message: impl AsRef<str>) {
        let span = end.saturating_sub(start) as usize;
        let offset = if total == 0 { span } else { span * done.min(total) / total };
        self.report(start + offset as u8, message);
    }

    /// 最後に通知した値
    pub fn last(&self) -> u8 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic() {
        let mut seen = Vec::new();
        {
            let mut callback = |p: u8, _: &str| seen.push(p);
            let mut progress = Progress::new(&mut callback);
            progress.report(10, "a");
            progress.report(5, "b");
            progress.report(120, "c");
        }
        assert_eq!(seen, vec![10, 10, 100]);
    }

    #[test]
    fn test_report_fraction() {
        let mut seen = Vec::new();
        {
            let mut callback = |p: u8, _: &str| seen.push(p);
            let mut progress = Progress::new(&mut callback);
            progress.report_fraction(76, 85, 1, 3, "batch 1/3");
            progress.report_fraction(76, 85, 3, 3, "batch 3/3");
            progress.report_fraction(85, 94, 0, 0, "nothing to do");
        }
        assert_eq!(seen, vec![79, 85, 94]);
    }

    #[test]
    fn test_silent_progress_tracks_last() {
        let mut progress = Progress::silent();
        progress.report(42, "x");
        assert_eq!(progress.last(), 42);
    }
}

//! 協調スケジューラの「次のターン」キュー
//!
//! イベントハンドラ内で予約した処理を、現在のイベントの反映後かつ
//! 次のイベント処理前に実行する。実時間のタイマーは使わない。

use std::collections::VecDeque;

/// 遅延タスクのキュー
#[derive(Debug, Clone)]
pub struct MicrotaskQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> MicrotaskQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// 次のターンで実行するタスクを予約
    pub fn schedule(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// 予約順にすべて実行
    ///
    /// 実行中に予約されたタスクも同じターンのうちに処理する。
    /// 実行したタスク数を返す。
    pub fn run_until_idle<F>(&mut self, mut run: F) -> usize
    where
        F: FnMut(T, &mut Self),
    {
        let mut executed = 0;
        while let Some(task) = self.tasks.pop_front() {
            run(task, self);
            executed += 1;
        }
        executed
    }

    /// 未実行のタスクを破棄
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T> Default for MicrotaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_tasks_in_schedule_order() {
        let mut queue = MicrotaskQueue::new();
        queue.schedule(1);
        queue.schedule(2);
        assert_eq!(queue.pending(), 2);

        let mut seen = Vec::new();
        let executed = queue.run_until_idle(|task, _| seen.push(task));

        assert_eq!(executed, 2);
        assert_eq!(seen, vec![1, 2]);
        assert!(queue.is_idle());
    }

    #[test]
    fn tasks_scheduled_while_running_are_drained() {
        let mut queue = MicrotaskQueue::new();
        queue.schedule(3u32);

        let mut seen = Vec::new();
        queue.run_until_idle(|task, q| {
            seen.push(task);
            if task > 1 {
                q.schedule(task - 1);
            }
        });

        assert_eq!(seen, vec![3, 2, 1]);
    }

    #[test]
    fn clear_discards_pending_tasks() {
        let mut queue = MicrotaskQueue::new();
        queue.schedule("settle");
        queue.clear();
        assert_eq!(queue.run_until_idle(|_, _| {}), 0);
    }
}

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use xy::Dir;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Key {
    Move(Dir),
    Wait,
}

impl Key {
    /// vi-keys: `hjkl` orthogonal, `yubn` diagonal, `.` to wait
    pub fn from_char(c: char) -> Option<Key> {
        Some(match c {
            'k' => Key::Move(Dir::N),
            'u' => Key::Move(Dir::NE),
            'l' => Key::Move(Dir::E),
            'n' => Key::Move(Dir::SE),
            'j' => Key::Move(Dir::S),
            'b' => Key::Move(Dir::SW),
            'h' => Key::Move(Dir::W),
            'y' => Key::Move(Dir::NW),
            '.' => Key::Wait,
            _ => return None,
        })
    }
}

/// Keys waiting for one actor. Local code pushes with `add_input`; other
/// threads deliver through the channel handed out by `sender`. Reads never
/// block: an actor either has a key this tick or it doesn't.
#[derive(Debug, Default)]
pub struct InputQueue {
    queue: VecDeque<Key>,
    inbox: Option<(Sender<Key>, Receiver<Key>)>,
}

impl InputQueue {
    pub fn add_input(&mut self, key: Key) {
        self.queue.push_back(key);
    }

    pub fn sender(&mut self) -> Sender<Key> {
        let (tx, _) = self.inbox.get_or_insert_with(mpsc::channel);
        tx.clone()
    }

    pub fn get_input(&mut self) -> Option<Key> {
        self.drain();
        self.queue.pop_front()
    }

    pub fn pending(&mut self) -> usize {
        self.drain();
        self.queue.len()
    }

    fn drain(&mut self) {
        let Some((_, rx)) = &self.inbox else { return };
        while let Ok(key) = rx.try_recv() { self.queue.push_back(key); }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_empty_queue_does_not_block() {
        let mut queue = InputQueue::default();
        assert_eq!(queue.get_input(), None);
        let _tx = queue.sender();
        assert_eq!(queue.get_input(), None);
    }

    #[test]
    fn test_local_inputs_are_fifo() {
        let mut queue = InputQueue::default();
        queue.add_input(Key::Move(Dir::E));
        queue.add_input(Key::Wait);
        assert_eq!(queue.pending(), 2);
        assert_eq!(queue.get_input(), Some(Key::Move(Dir::E)));
        assert_eq!(queue.get_input(), Some(Key::Wait));
        assert_eq!(queue.get_input(), None);
    }

    #[test]
    fn test_keys_from_another_thread_follow_local_ones() {
        let mut queue = InputQueue::default();
        queue.add_input(Key::Wait);
        let tx = queue.sender();
        thread::spawn(move || {
            tx.send(Key::Move(Dir::N)).unwrap();
            tx.send(Key::Move(Dir::S)).unwrap();
        }).join().unwrap();

        assert_eq!(queue.get_input(), Some(Key::Wait));
        assert_eq!(queue.get_input(), Some(Key::Move(Dir::N)));
        assert_eq!(queue.get_input(), Some(Key::Move(Dir::S)));
    }

    #[test]
    fn test_vi_keys() {
        assert_eq!(Key::from_char('y'), Some(Key::Move(Dir::NW)));
        assert_eq!(Key::from_char('n'), Some(Key::Move(Dir::SE)));
        assert_eq!(Key::from_char('.'), Some(Key::Wait));
        assert_eq!(Key::from_char('x'), None);
    }
}

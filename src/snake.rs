use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Stop,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The direction that would take the snake straight back where it came from.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Stop => None,
            Up => Some(Down),
            Down => Some(Up),
            Left => Some(Right),
            Right => Some(Left),
            UpLeft => Some(DownRight),
            DownRight => Some(UpLeft),
            UpRight => Some(DownLeft),
            DownLeft => Some(UpRight),
        }
    }

    /// Unit step (dx, dy), with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Stop => (0, 0),
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
            UpLeft => (-1, -1),
            UpRight => (1, -1),
            DownLeft => (-1, 1),
            DownRight => (1, 1),
        }
    }

    pub fn velocity(self, box_size: i32) -> Coords {
        let (dx, dy) = self.delta();
        (dx * box_size, dy * box_size)
    }
}

pub struct Snake {
    head: Coords,
    body: Vec<Coords>,
    direction: Direction,
}

impl Snake {
    /// A snake that has not moved yet: a head and no body.
    pub fn new(head: Coords) -> Self {
        Snake { head, body: vec![], direction: Stop }
    }

    /// A snake laid out along `body`, oldest cell first. The last cell is the head.
    pub fn with_body(body: Vec<Coords>, direction: Direction) -> Self {
        let head = body.last().copied().unwrap_or((0, 0));
        Snake { head, body, direction }
    }

    pub fn head(&self) -> Coords {
        self.head
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns towards `new_direction`. With `prevent_reversal` a request for the
    /// exact opposite of the current direction is dropped. Returns whether the
    /// direction was taken.
    pub fn steer(&mut self, new_direction: Direction, prevent_reversal: bool) -> bool {
        if prevent_reversal && self.direction.opposite() == Some(new_direction) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Moves the head one step and pushes it onto the body.
    pub fn advance(&mut self, box_size: i32) -> Coords {
        let (dx, dy) = self.direction.velocity(box_size);
        self.head = (self.head.0 + dx, self.head.1 + dy);
        self.body.push(self.head);
        self.head
    }

    /// Drops cells from the tail until at most `max_len` remain.
    pub fn truncate(&mut self, max_len: usize) {
        if self.body.len() > max_len {
            let excess = self.body.len() - max_len;
            self.body.drain(0..excess);
        }
    }

    /// Whether the head sits on any other body cell.
    pub fn bites_itself(&self) -> bool {
        match self.body.split_last() {
            Some((head, rest)) => rest.contains(head),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 9] = [Stop, Up, Down, Left, Right, UpLeft, UpRight, DownLeft, DownRight];

    #[test]
    fn test_opposites_are_symmetric() {
        for dir in ALL {
            if let Some(opp) = dir.opposite() {
                assert_eq!(opp.opposite(), Some(dir));
                let (dx, dy) = dir.delta();
                assert_eq!(opp.delta(), (-dx, -dy));
            }
        }
        assert_eq!(Stop.opposite(), None);
        assert_eq!(UpRight.opposite(), Some(DownLeft));
    }

    #[test]
    fn test_velocity() {
        assert_eq!(Stop.velocity(10), (0, 0));
        assert_eq!(Left.velocity(10), (-10, 0));
        assert_eq!(DownRight.velocity(10), (10, 10));
    }

    #[test]
    fn test_steer_reversal() {
        let mut snake = Snake::new((100, 100));
        assert!(snake.steer(Right, true));
        assert!(!snake.steer(Left, true));
        assert_eq!(snake.direction(), Right);

        assert!(snake.steer(Left, false));
        assert_eq!(snake.direction(), Left);
    }

    #[test]
    fn test_advance_and_truncate() {
        let mut snake = Snake::new((100, 100));
        snake.steer(Down, true);

        assert_eq!(snake.advance(10), (100, 110));
        assert_eq!(snake.advance(10), (100, 120));
        assert_eq!(snake.body(), &[(100, 110), (100, 120)]);

        snake.truncate(1);
        assert_eq!(snake.body(), &[(100, 120)]);
        assert_eq!(snake.head(), (100, 120));
    }

    #[test]
    fn test_bites_itself() {
        let snake = Snake::with_body(vec![(10, 10), (20, 10), (10, 10)], Left);
        assert!(snake.bites_itself());

        let snake = Snake::with_body(vec![(10, 10), (20, 10), (30, 10)], Right);
        assert!(!snake.bites_itself());

        assert!(!Snake::new((0, 0)).bites_itself());
    }
}

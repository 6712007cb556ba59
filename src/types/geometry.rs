/// Integer rectangle in screen or tablet coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Bounding box of both rectangles; empty rectangles do not contribute
    pub fn united(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Bounding box of all rectangles (the virtual desktop for screens)
    pub fn bounding(rects: &[Rect]) -> Rect {
        rects
            .iter()
            .fold(Rect::default(), |acc, rect| acc.united(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_united_side_by_side() {
        let left = Rect::new(0, 0, 1920, 1080);
        let right = Rect::new(1920, 0, 2560, 1440);
        assert_eq!(left.united(&right), Rect::new(0, 0, 4480, 1440));
    }

    #[test]
    fn test_united_ignores_empty() {
        let screen = Rect::new(100, 50, 800, 600);
        assert_eq!(Rect::default().united(&screen), screen);
        assert_eq!(screen.united(&Rect::new(0, 0, 0, 10)), screen);
    }

    #[test]
    fn test_bounding_negative_origin() {
        let rects = [Rect::new(-1280, 0, 1280, 1024), Rect::new(0, -200, 1920, 1080)];
        assert_eq!(Rect::bounding(&rects), Rect::new(-1280, -200, 3200, 1224));
    }

    #[test]
    fn test_bounding_no_screens() {
        assert!(Rect::bounding(&[]).is_empty());
    }
}

use crate::models::NamedImage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slide<'a> {
    Empty,
    Image {
        index: usize,
        total: usize,
        image: &'a NamedImage,
    },
    Grid(&'a [NamedImage]),
}

// Slideshow over every image, with a grid overview past either end
#[derive(Debug, Clone, PartialEq)]
pub struct Slideshow {
    images: Vec<NamedImage>,
    index: usize,
    grid: bool,
}

impl Slideshow {
    pub fn new(images: Vec<NamedImage>) -> Self {
        Self {
            images,
            index: 0,
            grid: false,
        }
    }

    pub fn images(&self) -> &[NamedImage] {
        &self.images
    }

    pub fn current(&self) -> Slide<'_> {
        if self.images.is_empty() {
            Slide::Empty
        } else if self.grid {
            Slide::Grid(&self.images)
        } else {
            Slide::Image {
                index: self.index,
                total: self.images.len(),
                image: &self.images[self.index],
            }
        }
    }

    pub fn next(&mut self) {
        if self.grid {
            self.show(0);
        } else {
            self.show(self.index as isize + 1);
        }
    }

    pub fn previous(&mut self) {
        if self.grid {
            self.show(self.images.len() as isize - 1);
        } else {
            self.show(self.index as isize - 1);
        }
    }

    pub fn show_grid(&mut self) {
        if !self.images.is_empty() {
            self.grid = true;
        }
    }

    // Back to the image that was showing before the grid opened
    pub fn close_grid(&mut self) {
        self.grid = false;
    }

    pub fn jump(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.index = index;
        self.grid = false;
        true
    }

    fn show(&mut self, index: isize) {
        if self.images.is_empty() {
            return;
        }
        if index < 0 || index as usize >= self.images.len() {
            self.grid = true;
            return;
        }
        self.index = index as usize;
        self.grid = false;
    }
}

/// Read-only row-major raster.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    /// Visit every pixel in row-major order as `(row, col, value)`.
    fn for_each_pixel<F>(&self, mut f: F)
    where
        Self: Sized,
        F: FnMut(usize, usize, Self::Pixel),
    {
        for (y, row) in self.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                f(y, x, v);
            }
        }
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}

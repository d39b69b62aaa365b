mod canvas;
mod segments;

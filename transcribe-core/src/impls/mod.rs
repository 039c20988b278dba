mod array;
mod map;
mod option;
mod pointer;
mod scalar;
mod vec;

//! Rule families of the bounds engine, split by the shape of the
//! operands.

mod functions;
mod oblivious;
mod type_params;

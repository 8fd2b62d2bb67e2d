use std::{
    error::Error,
    fmt::{Display, Formatter},
};

/// The single failure surfaced by the prediction and statistics entry points.
///
/// Whatever went wrong inside the pipeline is collapsed into a message. Callers serving this over
/// a network should report it with the status from [PredictionError::status].
#[derive(Debug, Clone)]
pub struct PredictionError {
    pub msg: String,
}

impl PredictionError {
    /// The HTTP-equivalent status code for this failure.
    pub fn status(&self) -> u16 {
        500
    }
}

impl Display for PredictionError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.msg)
    }
}

impl Error for PredictionError {}

impl From<Box<dyn Error>> for PredictionError {
    fn from(err: Box<dyn Error>) -> Self {
        PredictionError {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_boxed_error_collapses_to_message() {
        let inner: Box<dyn Error> = From::from("no such table: quakes");
        let err = PredictionError::from(inner);

        assert_eq!(err.msg, "no such table: quakes");
        assert_eq!(err.to_string(), "no such table: quakes");
        assert_eq!(err.status(), 500);
    }
}

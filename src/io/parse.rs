//! Low-level tokenization of whitespace-delimited ASCII input.
//!
//! The STL grammar in this crate is purely token based: keywords and float
//! literals separated by arbitrary whitespace (including line breaks). The
//! tokenizer hides the byte-level scanning behind a handful of methods. It
//! never judges grammar itself; a missing or mismatched token is reported
//! as `false`/`None` and the caller decides what was expected there.

use std::io;

use crate::io::Error;


const BUF_LEN: usize = 8 * 1024;

/// A whitespace-delimited token reader over any `io::Read`.
pub(crate) struct Tokenizer<R: io::Read> {
    input: R,
    buf: Vec<u8>,
    pos: usize,
    end: usize,
    token: String,
}

impl<R: io::Read> Tokenizer<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: vec![0; BUF_LEN],
            pos: 0,
            end: 0,
            token: String::new(),
        }
    }

    /// Reads the next token. Returns `Ok(false)` at the end of the input, in
    /// which case [`Tokenizer::token`] is empty.
    pub fn advance(&mut self) -> Result<bool, Error> {
        self.token.clear();

        let mut byte = loop {
            match self.next_byte()? {
                Some(b) if b.is_ascii_whitespace() => continue,
                Some(b) => break b,
                None => return Ok(false),
            }
        };

        loop {
            // Valid STL is pure ASCII. Anything else is smuggled through as a
            // replacement char: keyword comparisons then fail and the caller
            // reports the grammar violation.
            self.token.push(if byte.is_ascii() { byte as char } else { '\u{fffd}' });

            byte = match self.next_byte()? {
                Some(b) if !b.is_ascii_whitespace() => b,
                _ => break,
            };
        }

        Ok(true)
    }

    /// The most recently read token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Advances and compares the new token against `tag`, case-sensitively.
    pub fn expecting(&mut self, tag: &str) -> Result<bool, Error> {
        Ok(self.advance()? && self.token == tag)
    }

    /// Advances and parses the new token as `f32`. `Ok(None)` if the input is
    /// exhausted or the token is not a float literal.
    pub fn float(&mut self) -> Result<Option<f32>, Error> {
        if !self.advance()? {
            return Ok(None);
        }
        Ok(self.token.parse().ok())
    }

    /// Reads three floats.
    pub fn vec3(&mut self) -> Result<Option<[f32; 3]>, Error> {
        let mut out = [0.0; 3];
        for slot in &mut out {
            match self.float()? {
                Some(v) => *slot = v,
                None => return Ok(None),
            }
        }
        Ok(Some(out))
    }

    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.pos == self.end {
            self.end = self.input.read(&mut self.buf)?;
            self.pos = 0;
            if self.end == 0 {
                return Ok(None);
            }
        }

        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(input: &str) -> Tokenizer<&[u8]> {
        Tokenizer::new(input.as_bytes())
    }

    #[test]
    fn splits_on_any_whitespace() -> Result<(), Error> {
        let mut tkn = tokenizer("solid  name\n\tfacet\r\n normal");

        for expected in &["solid", "name", "facet", "normal"] {
            assert!(tkn.advance()?);
            assert_eq!(tkn.token(), *expected);
        }
        assert!(!tkn.advance()?);
        assert_eq!(tkn.token(), "");

        Ok(())
    }

    #[test]
    fn advance_at_eof_keeps_returning_false() -> Result<(), Error> {
        let mut tkn = tokenizer("  \n ");
        assert!(!tkn.advance()?);
        assert!(!tkn.advance()?);
        Ok(())
    }

    #[test]
    fn expecting_is_case_sensitive() -> Result<(), Error> {
        let mut tkn = tokenizer("solid SOLID");
        assert!(tkn.expecting("solid")?);
        assert!(!tkn.expecting("solid")?);
        Ok(())
    }

    #[test]
    fn floats_in_common_notations() -> Result<(), Error> {
        let mut tkn = tokenizer("1 -0.5 1.020000E+001 2.5e-3");
        assert_eq!(tkn.float()?, Some(1.0));
        assert_eq!(tkn.float()?, Some(-0.5));
        assert_eq!(tkn.float()?, Some(10.2));
        assert_eq!(tkn.float()?, Some(0.0025));
        assert_eq!(tkn.float()?, None);
        Ok(())
    }

    #[test]
    fn non_float_token_is_none() -> Result<(), Error> {
        let mut tkn = tokenizer("outer 1.0");
        assert_eq!(tkn.float()?, None);
        Ok(())
    }

    #[test]
    fn vec3_needs_three_floats() -> Result<(), Error> {
        let mut tkn = tokenizer("0 0 1");
        assert_eq!(tkn.vec3()?, Some([0.0, 0.0, 1.0]));

        let mut tkn = tokenizer("1.0 2.0 endloop");
        assert_eq!(tkn.vec3()?, None);

        Ok(())
    }

    #[test]
    fn tokens_straddle_buffer_refills() -> Result<(), Error> {
        // long runs of padding force multiple refills of the internal buffer
        let padding = " ".repeat(3 * BUF_LEN / 2);
        let input = format!("first{}second", padding);
        let mut tkn = Tokenizer::new(input.as_bytes());

        assert!(tkn.advance()?);
        assert_eq!(tkn.token(), "first");
        assert!(tkn.advance()?);
        assert_eq!(tkn.token(), "second");
        assert!(!tkn.advance()?);

        Ok(())
    }
}

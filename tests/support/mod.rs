#![allow(dead_code)]

//! Builders for synthetic record streams.

#[derive(Debug, Clone, Copy)]
pub enum Order {
    Little,
    Big,
}

/// A record body under construction.
#[derive(Debug, Clone)]
pub struct Body {
    order: Order,
    bytes: Vec<u8>,
}

impl Body {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            bytes: vec![],
        }
    }

    fn int(mut self, x: u64, width: usize) -> Self {
        let le = x.to_le_bytes();
        let bytes = &le[..width];
        match self.order {
            Order::Little => self.bytes.extend(bytes),
            Order::Big => self.bytes.extend(bytes.iter().rev()),
        }
        self
    }

    pub fn u1(self, x: u8) -> Self {
        self.int(x.into(), 1)
    }

    pub fn u2(self, x: u16) -> Self {
        self.int(x.into(), 2)
    }

    pub fn u4(self, x: u32) -> Self {
        self.int(x.into(), 4)
    }

    pub fn i2(self, x: i16) -> Self {
        self.int(x as u16 as u64, 2)
    }

    pub fn r4(self, x: f32) -> Self {
        self.int(x.to_bits().into(), 4)
    }

    pub fn c1(self, x: char) -> Self {
        self.u1(x as u8)
    }

    pub fn cn(self, s: &str) -> Self {
        self.u1(s.len() as u8).raw(s.as_bytes())
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A stream under construction.
#[derive(Debug, Clone)]
pub struct Stream {
    order: Order,
    bytes: Vec<u8>,
}

impl Stream {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            bytes: vec![],
        }
    }

    /// Start a stream with an identification record for its byte order.
    pub fn identified(order: Order) -> Self {
        let cpu_type = match order {
            Order::Big => 1,
            Order::Little => 2,
        };
        Self::new(order).far(cpu_type)
    }

    pub fn body(&self) -> Body {
        Body::new(self.order)
    }

    pub fn far(self, cpu_type: u8) -> Self {
        let body = self.body().u1(cpu_type).u1(4);
        self.record(0, 10, body)
    }

    pub fn record(self, major: u8, minor: u8, body: Body) -> Self {
        let length = body.bytes.len() as u16;
        self.record_with_length(major, minor, length, body.bytes())
    }

    /// Append a record whose declared length may differ from its body.
    pub fn record_with_length(mut self, major: u8, minor: u8, length: u16, body: &[u8]) -> Self {
        match self.order {
            Order::Little => self.bytes.extend(length.to_le_bytes()),
            Order::Big => self.bytes.extend(length.to_be_bytes()),
        }
        self.bytes.extend([major, minor]);
        self.bytes.extend_from_slice(body);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

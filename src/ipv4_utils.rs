use crate::error::AppError;
use crate::ipv4_codec::decode;
use ipnet::Ipv4Net;
use std::fmt;
use std::net::Ipv4Addr;

/// 両端を含むIPv4の連続範囲。`start <= end` は生成時に保証する。
/// 単一IPは `start == end` の退化ケース。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IpInterval {
    start: u32,
    end: u32,
}

impl IpInterval {
    pub fn new(start: u32, end: u32) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidRange {
                start: decode(start),
                end: decode(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn single(ip: u32) -> Self {
        Self { start: ip, end: ip }
    }

    /// プレフィックス長付きのネットワークを範囲に変換する。
    /// ホスト部が立っていても開始側はネットワークアドレスに丸める。
    pub fn from_cidr(base: Ipv4Addr, prefix: u8) -> Result<Self, AppError> {
        let net = Ipv4Net::new(base, prefix).map_err(|_| {
            AppError::InvalidCidr(format!("invalid prefix 0-32: {}", prefix))
        })?;
        Ok(Self {
            start: u32::from(net.network()),
            end: u32::from(net.broadcast()),
        })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn start_ip(&self) -> String {
        decode(self.start)
    }

    pub fn end_ip(&self) -> String {
        decode(self.end)
    }

    /// 含まれるアドレス数。/0 は 2^32 になるので u64。
    pub fn size(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// 部分的な重なりも含む交差判定
    pub fn overlaps(&self, other: &IpInterval) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// 交差部分。重なりがなければ None。
    pub fn intersection(&self, other: &IpInterval) -> Option<IpInterval> {
        if !self.overlaps(other) {
            return None;
        }
        Some(IpInterval {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// この範囲をちょうど覆う最小のCIDR列
    pub fn to_cidrs(&self) -> Vec<Ipv4Net> {
        ipv4_summarize_range(u64::from(self.start), u64::from(self.end))
    }
}

impl fmt::Display for IpInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start_ip())
        } else {
            write!(f, "{}-{}", self.start_ip(), self.end_ip())
        }
    }
}

pub trait ILog2Sub1U64 {
    fn ilog2_sub1_u64(&self) -> u32;
}

impl ILog2Sub1U64 for u64 {
    fn ilog2_sub1_u64(&self) -> u32 {
        if *self == 0 {
            0
        } else {
            63 - self.leading_zeros()
        }
    }
}

/// currentから始まりendを超えない最大のIPv4 CIDRプレフィックス長(≤ 32)を返す。
pub fn largest_ipv4_block(current: u64, end: u64) -> u8 {
    debug_assert!(current <= end, "current must be <= end");

    // current(32ビット空間)の末尾ゼロビットの数
    let tz: u32 = (current as u32).trailing_zeros();
    // 残りのアドレス範囲に収まるビット数
    let span: u32 = (end - current + 1).ilog2_sub1_u64();

    // ホスト部で使用可能なビット
    let max_block = tz.min(span);
    // CIDRプレフィックス長(0-32)
    (32 - max_block) as u8
}

/// IPv4の範囲[`start`, `end`]をCIDRの最小セットにまとめる。
pub fn ipv4_summarize_range(start: u64, end: u64) -> Vec<Ipv4Net> {
    let mut cidrs = Vec::<Ipv4Net>::new();
    let mut current = start;

    while current <= end {
        // 32ビット空間の外は扱わない
        if current > u32::MAX as u64 {
            break;
        }
        let max_size = largest_ipv4_block(current, end);

        if let Ok(net) = Ipv4Net::new(Ipv4Addr::from(current as u32), max_size) {
            cidrs.push(net);
            let block_size: u64 = 1u64 << (32 - max_size);
            current = current.saturating_add(block_size);
        } else {
            // フェイルセーフ
            break;
        }
    }

    cidrs
}

use super::{Bitpix, FitsError, Header};

/// What an HDU holds, as far as colorizing is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HduKind {
    Primary,
    Image,
    /// Tables, random groups and anything else that is not a plain image
    Other(String),
}

impl HduKind {
    #[inline]
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Primary | Self::Image)
    }
}

/// Shape and size of one HDU's data unit
#[derive(Debug, Clone, PartialEq)]
pub struct HduLayout {
    pub kind: HduKind,
    pub bitpix: i64,
    pub axes: Vec<usize>,
    /// Unpadded data unit length in bytes
    pub data_len: usize,
}

impl HduLayout {
    /// Width and height of the first image plane, `None` when NAXIS is 0
    #[must_use]
    pub fn plane(&self) -> Option<(usize, usize)> {
        match self.axes.as_slice() {
            [] => None,
            [width] => Some((*width, 1)),
            [width, height, ..] => Some((*width, *height)),
        }
    }
}

/// Read the mandatory structural keywords of an HDU header
pub fn validate_layout(header: &Header, hdu: usize) -> Result<HduLayout, FitsError> {
    let kind = validate_kind(header, hdu)?;

    let bitpix = required_int(header, "BITPIX", hdu)?;
    if bitpix == 0 || bitpix % 8 != 0 {
        return Err(invalid(header, "BITPIX", hdu));
    }

    let naxis = required_int(header, "NAXIS", hdu)?;
    if !(0..=999).contains(&naxis) {
        return Err(invalid(header, "NAXIS", hdu));
    }

    let axes = (1..=naxis)
        .map(|n| {
            let keyword = format!("NAXIS{n}");
            let len = required_int(header, &keyword, hdu)?;
            usize::try_from(len).map_err(|_| invalid(header, &keyword, hdu))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let random_groups = matches!(kind, HduKind::Primary) && header.get_logical("GROUPS") == Some(true);
    let kind = if random_groups {
        HduKind::Other("random groups".to_string())
    } else {
        kind
    };

    let pcount = optional_count(header, "PCOUNT", 0, hdu)?;
    let gcount = optional_count(header, "GCOUNT", 1, hdu)?;

    let data_len = if axes.is_empty() {
        0
    } else {
        // Random groups store NAXIS1 = 0 and leave it out of the product
        let skip = usize::from(random_groups);
        axes[skip..]
            .iter()
            .try_fold(1usize, |acc, &len| acc.checked_mul(len))
            .and_then(|n| n.checked_add(pcount))
            .and_then(|n| n.checked_mul(gcount))
            .and_then(|n| n.checked_mul(bitpix.unsigned_abs() as usize / 8))
            .ok_or_else(|| invalid(header, "NAXIS", hdu))?
    };

    // Image HDUs must be decodable before we commit to reading them
    if kind.is_image() {
        Bitpix::from_value(bitpix, hdu)?;
    }

    Ok(HduLayout {
        kind,
        bitpix,
        axes,
        data_len,
    })
}

fn validate_kind(header: &Header, hdu: usize) -> Result<HduKind, FitsError> {
    if hdu == 0 {
        if header.first_keyword() != Some("SIMPLE") || header.get_logical("SIMPLE") != Some(true) {
            return Err(FitsError::NotFits(
                "primary header must start with SIMPLE = T".to_string(),
            ));
        }
        return Ok(HduKind::Primary);
    }

    if header.first_keyword() != Some("XTENSION") {
        return Err(FitsError::MissingKeyword {
            hdu,
            keyword: "XTENSION".to_string(),
        });
    }

    match header.get_text("XTENSION") {
        Some("IMAGE") => Ok(HduKind::Image),
        Some(other) => Ok(HduKind::Other(other.to_string())),
        None => Err(invalid(header, "XTENSION", hdu)),
    }
}

fn required_int(header: &Header, keyword: &str, hdu: usize) -> Result<i64, FitsError> {
    match header.get(keyword) {
        None => Err(FitsError::MissingKeyword {
            hdu,
            keyword: keyword.to_string(),
        }),
        Some(_) => header.get_int(keyword).ok_or_else(|| invalid(header, keyword, hdu)),
    }
}

fn optional_count(header: &Header, keyword: &str, default: usize, hdu: usize) -> Result<usize, FitsError> {
    match header.get(keyword) {
        None => Ok(default),
        Some(_) => header
            .get_int(keyword)
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| invalid(header, keyword, hdu)),
    }
}

fn invalid(header: &Header, keyword: &str, hdu: usize) -> FitsError {
    FitsError::InvalidKeyword {
        hdu,
        keyword: keyword.to_string(),
        value: header.get(keyword).map(ToString::to_string).unwrap_or_default(),
    }
}

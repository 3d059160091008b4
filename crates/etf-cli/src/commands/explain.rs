//! 성과 지표 공식과 설명.

use std::fmt;
use std::str::FromStr;

/// 설명 대상 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Sharpe,
    Treynor,
    Jensen,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Sharpe, Measure::Treynor, Measure::Jensen];

    pub fn title(&self) -> &'static str {
        match self {
            Measure::Sharpe => "Sharpe Measure",
            Measure::Treynor => "Treynor Measure",
            Measure::Jensen => "Jensen's Measure",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            Measure::Sharpe => "Sharpe Ratio = (Rp - Rf) / σp",
            Measure::Treynor => "Treynor Ratio = (Rp - Rf) / βp",
            Measure::Jensen => "Jensen's Alpha = Rp - (Rf + βp(Rm - Rf))",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Measure::Sharpe => {
                "포트폴리오가 감수한 총위험(표준편차) 한 단위당 무위험 자산 대비 초과수익을 나타냅니다. \
                 특정 시장 포트폴리오에 의존하지 않으므로 두 포트폴리오를 빠르게 비교할 때 유용하며, \
                 업계에서 가장 널리 쓰이는 위험 조정 지표입니다."
            }
            Measure::Treynor => {
                "초과수익을 포트폴리오 베타로 나눠 체계적 위험 한 단위당 성과를 평가합니다. \
                 값이 높을수록 시장 위험 대비 성과가 좋다는 뜻이며, 베타가 체계적 위험을 정확히 \
                 측정한다고 가정합니다. 비체계적 위험은 반영하지 않습니다."
            }
            Measure::Jensen => {
                "CAPM이 베타와 시장 위험 프리미엄으로 예측한 수익률을 넘어선 초과수익입니다. \
                 양수면 체계적 위험 대비 기대 이상의 성과를, 음수면 기대에 못 미치는 성과를 뜻합니다. \
                 알파를 만들어 내는 운용 능력을 평가할 때 쓰입니다."
            }
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sharpe" => Ok(Measure::Sharpe),
            "treynor" => Ok(Measure::Treynor),
            "jensen" | "alpha" => Ok(Measure::Jensen),
            _ => Err(format!(
                "Unknown measure: {}. Supported: sharpe, treynor, jensen, all",
                s
            )),
        }
    }
}

/// 지표 하나의 제목, 공식, 설명.
pub fn render_explanation(measure: Measure) -> String {
    format!(
        "[{}]\n  {}\n\n  {}\n",
        measure.title(),
        measure.formula(),
        measure.description()
    )
}

/// `explain` 명령 대상. `None` 또는 `"all"`이면 전체.
pub fn select_measures(name: Option<&str>) -> Result<Vec<Measure>, String> {
    match name {
        None => Ok(Measure::ALL.to_vec()),
        Some(n) if n.trim().eq_ignore_ascii_case("all") => Ok(Measure::ALL.to_vec()),
        Some(n) => Ok(vec![n.parse()?]),
    }
}

/// `explain` 명령 실행.
pub fn run_explain(name: Option<&str>) -> anyhow::Result<()> {
    let measures = select_measures(name).map_err(anyhow::Error::msg)?;
    for measure in measures {
        println!("{}", render_explanation(measure));
    }
    Ok(())
}

use serde::{Deserialize, Serialize};

/// Bibliographic record attached to results produced by a method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationInfo {
    pub description: String,
    pub bibtex: String,
    pub endnote: String,
    pub doi: String,
}

/// Vo, Drakopoulos, Atwood & Reinhard, Optics Express 22(16), 2014.
pub fn vo_2014_citation() -> CitationInfo {
    CitationInfo {
        description: "The center of rotation for this reconstruction was calculated \
                      automatically using the method described in this work"
            .to_string(),
        bibtex: concat!(
            "@article{vo2014reliable,\n",
            "title={Reliable method for calculating the center of rotation ",
            "in parallel-beam tomography},\n",
            "author={Vo, Nghia T and Drakopoulos, Michael and Atwood, ",
            "Robert C and Reinhard, Christina},\n",
            "journal={Optics Express},\n",
            "volume={22},\n",
            "number={16},\n",
            "pages={19078--19086},\n",
            "year={2014},\n",
            "publisher={Optical Society of America}\n",
            "}"
        )
        .to_string(),
        endnote: concat!(
            "%0 Journal Article\n",
            "%T Reliable method for calculating the center of rotation in ",
            "parallel-beam tomography\n",
            "%A Vo, Nghia T\n",
            "%A Drakopoulos, Michael\n",
            "%A Atwood, Robert C\n",
            "%A Reinhard, Christina\n",
            "%J Optics Express\n",
            "%V 22\n",
            "%N 16\n",
            "%P 19078-19086\n",
            "%@ 1094-4087\n",
            "%D 2014\n",
            "%I Optical Society of America"
        )
        .to_string(),
        doi: "http://dx.doi.org/10.1364/OE.22.019078".to_string(),
    }
}

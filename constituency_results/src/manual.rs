/*!

This is the long-form manual for `constituency_results` and `pcresults`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values with a header row
* `xlsx` Excel workbook, first row of the worksheet is the header

Only the columns named in the schema are read, in any order. Other columns are
ignored.

### `csv`

```text
pc,name,party,Votes_Total,age,category,symbol
Chennai North,A,PartyX,50000,54,GEN,Sun
Chennai North,B,PartyY,70000,61,GEN,Leaf
Chennai South,C,PartyZ,99999,47,SC,Hand
```

The `age`, `category` and `symbol` columns are optional. When they are absent,
the cards simply do not show them.

Vote totals must be non-negative whole numbers (`5000.0` is accepted).
Anything else is handled by the `invalidVotePolicy` of the schema:
* `reject` (default) the whole file is considered unavailable
* `skipRow` the row is dropped and a warning is logged

### `xlsx`

Same layout as the CSV format. Numeric cells are read as numbers. The worksheet
is the first one unless `excelWorksheetName` is given.

## Variants

Two presets are built in. They differ in layout, colours and the way the
candidate photos are named.

| | `tn2019` | `pc2024` |
|---|---|---|
| resource | `/TN2019.csv` | `/resultsPC24.csv` |
| chart size | 600 x 480 | 700 x 560 |
| margins (top, right, bottom, left) | 30, 10, 100, 100 | 15, 10, 110, 30 |
| band padding | 0.08 | 0.1 |
| bar colour | `#deb887` | `#1db6d5` |
| photos | `/pics/ChennaiNorth/loser1.jpeg` | `/candi-pics/ChennaiNorth/Loser 1.jpg` |
| title | `Chennai North Election Results` | `Chennai North` |

## Configuration

`pcresults` accepts a JSON configuration with the `--config` flag. Paths are
relative to the directory of the configuration file.

```json
{
  "outputSettings": { "title": "Lok Sabha 2024" },
  "dataSources": [
    { "provider": "csv", "filePath": "resultsPC24.csv", "resourceId": "/resultsPC24.csv" }
  ],
  "schema": { "variant": "pc2024", "invalidVotePolicy": "skipRow" },
  "chart": { "viewportWidth": 480, "barColor": "#ff8800" },
  "images": { "basePath": "https://example.org/photos", "extension": "png" }
}
```

All the sections except `dataSources` are optional. Fields that are not given
keep the value of the variant.

`schema` fields: `variant`, `resourceId`, `constituencyColumn`, `nameColumn`,
`partyColumn`, `votesColumn`, `ageColumn`, `categoryColumn`, `symbolColumn`,
`invalidVotePolicy` (`reject`, `skipRow`), `notaLabel`, `titleStyle`
(`electionResults`, `nameOnly`), `rankLimit`.

`chart` fields: `width`, `height`, `viewportWidth`, `marginTop`,
`marginRight`, `marginBottom`, `marginLeft`, `bandPadding`, `barColor`,
`labelColor`, `numberFormat` (`indian`, `western`, `plain`), `yAxisTitle`,
`axisTitleSize`, `axisTitleBold`, `tickFormat` (same values as
`numberFormat`), `tickLabelSize`, `tickCount`.

`images` fields: `basePath`, `folderCase` (`titleCase`, `asIs`),
`winnerLabel`, `loserPrefix`, `loserSeparator`, `extension`.

## Output

The summary written with `--out` is a JSON document:

```json
{
  "config": { "variant": "pc2024", "resource": "/resultsPC24.csv" },
  "results": {
    "constituency": "Chennai North",
    "title": "Chennai North",
    "totalCandidates": 2,
    "candidatesExcludingNota": 2,
    "ranked": [ { "rank": 1, "name": "B", "party": "PartyY", "votes": "70000", "votesLabel": "70,000" } ],
    "chart": { "width": 700.0, "height": 560.0, "yDomainMax": 70000.0, "bars": [] },
    "cards": [ { "position": "Winner", "image": "/candi-pics/ChennaiNorth/Winner.jpg" } ]
  }
}
```

`--svg` writes the chart alone, `--html` writes a page with both panels.
Relative output paths are placed in `outputSettings.outputDirectory` when it
is set.

*/
